//! Movie search service over a swappable catalog provider.

use std::sync::Arc;
use std::time::Instant;

use reelscout_core::RuntimeMode;
use reelscout_core::config::CatalogConfig;

use crate::errors::FetchError;
use crate::providers::{DemoCatalog, MovieCatalog, TmdbCatalog};
use crate::types::{CatalogQuery, Movie};

/// Movie search service providing discover and title search.
///
/// Cheap to clone; clones share the provider.
#[derive(Debug, Clone)]
pub struct MovieSearchService {
    provider: Arc<dyn MovieCatalog>,
}

impl MovieSearchService {
    /// Creates a service backed by `provider`.
    pub fn new(provider: Arc<dyn MovieCatalog>) -> Self {
        Self { provider }
    }

    /// Creates a service backed by the built-in demo catalog.
    pub fn new_demo() -> Self {
        Self::new(Arc::new(DemoCatalog::new()))
    }

    /// Picks the provider for the runtime mode.
    ///
    /// # Errors
    /// - `FetchError::MissingApiKey` - Production mode without an API key
    /// - `FetchError::Transport` - HTTP client could not be built
    pub fn from_runtime_mode(mode: RuntimeMode, config: &CatalogConfig) -> Result<Self, FetchError> {
        match mode {
            RuntimeMode::Production => Ok(Self::new(Arc::new(TmdbCatalog::from_config(config)?))),
            RuntimeMode::Development => Ok(Self::new_demo()),
        }
    }

    /// Fetches movies for a committed search term.
    ///
    /// The empty term lists popular movies; anything else is a title search.
    ///
    /// # Errors
    /// - `FetchError::Transport` - Network connectivity issues
    /// - `FetchError::Status` - Catalog rejected the request
    /// - `FetchError::Decode` - Catalog response was malformed
    pub async fn fetch_movies(&self, term: &str) -> Result<Vec<Movie>, FetchError> {
        let query = CatalogQuery::from_term(term);
        let started = Instant::now();

        let result = self.provider.fetch_movies(&query).await;

        match &result {
            Ok(movies) => tracing::debug!(
                provider = self.provider.name(),
                term,
                results = movies.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Catalog fetch succeeded"
            ),
            Err(e) => tracing::error!(
                provider = self.provider.name(),
                term,
                error = %e,
                "Catalog fetch failed"
            ),
        }

        result
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
