//! Catalog provider implementations.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::types::{CatalogQuery, Movie};

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;
pub mod tmdb;

pub use demo::DemoCatalog;
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::{ScriptedCatalog, ScriptedResponse};
pub use tmdb::TmdbCatalog;

/// Trait for movie catalog providers.
///
/// Implementations provide movie listings through different backends
/// (live API, built-in demo data, scripted responses for testing).
#[async_trait]
pub trait MovieCatalog: Send + Sync + std::fmt::Debug {
    /// Fetches the movies matching `query`.
    ///
    /// Returns an empty list when the catalog has no results.
    ///
    /// # Errors
    /// - `FetchError::Transport` - No response received
    /// - `FetchError::Status` - Non-success HTTP status
    /// - `FetchError::Decode` - Malformed response body
    async fn fetch_movies(&self, query: &CatalogQuery) -> Result<Vec<Movie>, FetchError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
