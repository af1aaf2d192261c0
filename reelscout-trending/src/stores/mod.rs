//! Trending store backends.

use async_trait::async_trait;

use crate::errors::AnalyticsError;
use crate::types::{NewTrendingEntry, TrendingEntry};

pub mod appwrite;
pub mod memory;

pub use appwrite::AppwriteStore;
pub use memory::InMemoryTrendingStore;

/// Document operations the trending service needs from a backend.
///
/// Each method maps to one backend call; the read-then-write counting logic
/// is layered on top in [`crate::TrendingService`].
#[async_trait]
pub trait TrendingStore: Send + Sync + std::fmt::Debug {
    /// Finds the entry whose search term equals `term` exactly.
    ///
    /// # Errors
    /// - `AnalyticsError::Transport` - Backend unreachable
    /// - `AnalyticsError::Status` - Backend rejected the request
    /// - `AnalyticsError::Decode` - Malformed backend response
    async fn find_by_term(&self, term: &str) -> Result<Option<TrendingEntry>, AnalyticsError>;

    /// Creates a new entry.
    ///
    /// # Errors
    /// - `AnalyticsError::Transport` - Backend unreachable
    /// - `AnalyticsError::Status` - Backend rejected the document
    /// - `AnalyticsError::Decode` - Malformed backend response
    async fn create_entry(&self, entry: NewTrendingEntry) -> Result<TrendingEntry, AnalyticsError>;

    /// Sets the count of the entry with identifier `id`.
    ///
    /// # Errors
    /// - `AnalyticsError::EntryNotFound` - No entry with that identifier
    /// - `AnalyticsError::Transport` - Backend unreachable
    /// - `AnalyticsError::Status` - Backend rejected the update
    async fn update_count(&self, id: &str, count: u64) -> Result<TrendingEntry, AnalyticsError>;

    /// Lists up to `limit` entries, highest count first.
    ///
    /// # Errors
    /// - `AnalyticsError::Transport` - Backend unreachable
    /// - `AnalyticsError::Status` - Backend rejected the query
    /// - `AnalyticsError::Decode` - Malformed backend response
    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendingEntry>, AnalyticsError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Whether entries outlive the current process.
    fn is_persistent(&self) -> bool {
        true
    }
}
