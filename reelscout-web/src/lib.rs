//! Reelscout Web - Search controller and server-rendered UI
//!
//! Owns the search state machine: raw input is debounced into a committed
//! term, each committed term triggers one catalog fetch, and settled results
//! are published as read-only snapshots. The HTMX + Tailwind pages render
//! exclusively from those snapshots.

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]

pub mod components;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod pages;
pub mod server;
pub mod state;

// Re-export main types
pub use controller::{ControllerError, ControllerHandle, spawn_search_controller};
pub use errors::WebError;
pub use server::{AppState, build_router, run_server};
pub use state::{FETCH_FAILED_MESSAGE, SearchSession, SearchState, ViewSnapshot};
