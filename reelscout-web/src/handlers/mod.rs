//! HTTP request handlers organized by functionality

pub mod api;
pub mod htmx;

// Re-export handler functions
pub use api::{SearchRequest, api_refresh_trending, api_search, api_state};
pub use htmx::{SearchForm, movies_fragment, submit_search, trending_fragment};
