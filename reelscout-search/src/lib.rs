//! Reelscout Search - Movie catalog access

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Queries a remote movie metadata catalog for popular titles or free-text
//! search results. Providers are swappable behind [`MovieCatalog`] so the
//! rest of the application runs the same against the live API, built-in
//! demo data or scripted test responses.

pub mod errors;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use errors::FetchError;
pub use providers::{DemoCatalog, MovieCatalog, TmdbCatalog};
#[cfg(any(test, feature = "test-utils"))]
pub use providers::{ScriptedCatalog, ScriptedResponse};
pub use service::MovieSearchService;
pub use types::{CatalogQuery, CatalogResponse, Movie};

/// Convenience type alias for Results with FetchError.
pub type Result<T> = std::result::Result<T, FetchError>;
