//! Search controller actor.
//!
//! A single task owns the [`SearchSession`](crate::state::SearchSession) and
//! applies every transition in order, so no lock guards the search state.
//! Callers talk to it through a cloneable [`ControllerHandle`]; catalog
//! fetches and analytics writes run in spawned tasks that report back to
//! the actor over a channel.

pub mod actor;
pub mod commands;
pub mod handle;

pub use actor::spawn_search_controller;
pub use commands::ControllerCommand;
pub use handle::ControllerHandle;

/// Errors returned by [`ControllerHandle`] operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ControllerError {
    /// The controller task has exited.
    #[error("Search controller has shut down")]
    Stopped,
}
