//! Search counting and trending lookups.

use std::sync::Arc;

use reelscout_core::RuntimeMode;
use reelscout_core::config::{AppwriteConfig, CatalogConfig};
use reelscout_search::Movie;
use tokio::sync::Mutex;

use crate::errors::AnalyticsError;
use crate::stores::{AppwriteStore, InMemoryTrendingStore, TrendingStore};
use crate::types::{NewTrendingEntry, TrendingEntry};

/// Number of trending entries shown when nothing else is configured.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Records committed searches and reads back the most searched terms.
///
/// Recording is a lookup followed by an update or create. Recordings made
/// through clones of the same service are serialized so two concurrent
/// searches for a new term cannot create duplicate entries.
#[derive(Debug, Clone)]
pub struct TrendingService {
    store: Arc<dyn TrendingStore>,
    image_base_url: String,
    write_lock: Arc<Mutex<()>>,
}

impl TrendingService {
    /// Creates a service over `store`, building poster URLs under `image_base_url`.
    pub fn new(store: Arc<dyn TrendingStore>, image_base_url: &str) -> Self {
        Self {
            store,
            image_base_url: image_base_url.to_string(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a service over a fresh in-memory store.
    pub fn in_memory(image_base_url: &str) -> Self {
        Self::new(Arc::new(InMemoryTrendingStore::new()), image_base_url)
    }

    /// Picks the store for the runtime mode.
    ///
    /// Production uses Appwrite when it is fully configured and falls back to
    /// the in-memory store otherwise, so missing analytics settings never
    /// block the catalog.
    ///
    /// # Errors
    /// - `AnalyticsError::Transport` - HTTP client could not be built
    pub fn from_runtime_mode(
        mode: RuntimeMode,
        appwrite: &AppwriteConfig,
        catalog: &CatalogConfig,
    ) -> Result<Self, AnalyticsError> {
        if mode.is_production() {
            if appwrite.is_configured() {
                let store = AppwriteStore::from_config(appwrite)?;
                return Ok(Self::new(Arc::new(store), &catalog.image_base_url));
            }
            tracing::warn!("Appwrite is not configured; trending searches kept in memory");
        }

        Ok(Self::in_memory(&catalog.image_base_url))
    }

    /// Counts one search for `query`, whose first result was `top_result`.
    ///
    /// An existing entry for the exact term gets its count incremented by one;
    /// otherwise a new entry is created with count 1 and the top result's
    /// poster.
    ///
    /// # Errors
    /// - `AnalyticsError` - Any failure of the underlying store
    pub async fn record_search(
        &self,
        query: &str,
        top_result: &Movie,
    ) -> Result<TrendingEntry, AnalyticsError> {
        let _guard = self.write_lock.lock().await;

        let entry = match self.store.find_by_term(query).await? {
            Some(existing) => {
                self.store
                    .update_count(&existing.id, existing.count + 1)
                    .await?
            }
            None => {
                let new_entry =
                    NewTrendingEntry::from_top_result(query, top_result, &self.image_base_url);
                self.store.create_entry(new_entry).await?
            }
        };

        tracing::debug!(
            store = self.store.name(),
            search_term = %entry.search_term,
            count = entry.count,
            "Recorded search"
        );

        Ok(entry)
    }

    /// Returns up to `limit` entries ordered by count, highest first.
    ///
    /// # Errors
    /// - `AnalyticsError` - Any failure of the underlying store
    pub async fn get_trending(&self, limit: usize) -> Result<Vec<TrendingEntry>, AnalyticsError> {
        self.store.top_by_count(limit).await
    }

    /// Name of the active store.
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Whether recorded searches are kept after this process exits.
    pub fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }
}
