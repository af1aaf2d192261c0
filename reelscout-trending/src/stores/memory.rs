//! Process-local trending store.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::TrendingStore;
use crate::errors::AnalyticsError;
use crate::types::{NewTrendingEntry, TrendingEntry};

/// Trending store kept in memory, used in development mode and tests.
///
/// Entries with equal counts are ordered by creation, oldest first.
#[derive(Debug, Default)]
pub struct InMemoryTrendingStore {
    entries: RwLock<Vec<TrendingEntry>>,
}

impl InMemoryTrendingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl TrendingStore for InMemoryTrendingStore {
    async fn find_by_term(&self, term: &str) -> Result<Option<TrendingEntry>, AnalyticsError> {
        Ok(self
            .entries
            .read()
            .iter()
            .find(|entry| entry.search_term == term)
            .cloned())
    }

    async fn create_entry(&self, entry: NewTrendingEntry) -> Result<TrendingEntry, AnalyticsError> {
        let now = Utc::now();
        let created = TrendingEntry {
            id: uuid::Uuid::new_v4().simple().to_string(),
            search_term: entry.search_term,
            count: entry.count,
            poster_url: entry.poster_url,
            movie_id: Some(entry.movie_id),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.entries.write().push(created.clone());
        Ok(created)
    }

    async fn update_count(&self, id: &str, count: u64) -> Result<TrendingEntry, AnalyticsError> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AnalyticsError::EntryNotFound { id: id.to_string() })?;

        entry.count = count;
        entry.updated_at = Some(Utc::now());
        Ok(entry.clone())
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendingEntry>, AnalyticsError> {
        // Stable sort keeps insertion order among equal counts.
        let mut entries = self.entries.read().clone();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(limit);
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(term: &str) -> NewTrendingEntry {
        NewTrendingEntry {
            search_term: term.to_string(),
            count: 1,
            poster_url: None,
            movie_id: 1,
        }
    }

    #[tokio::test]
    async fn test_find_is_exact_match() {
        let store = InMemoryTrendingStore::new();
        store.create_entry(new_entry("Dune")).await.unwrap();

        assert!(store.find_by_term("Dune").await.unwrap().is_some());
        assert!(store.find_by_term("dune").await.unwrap().is_none());
        assert!(store.find_by_term("Dun").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_entry_fails() {
        let store = InMemoryTrendingStore::new();

        let result = store.update_count("missing", 3).await;

        assert_eq!(
            result.unwrap_err(),
            AnalyticsError::EntryNotFound {
                id: "missing".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_top_by_count_orders_and_limits() {
        let store = InMemoryTrendingStore::new();
        let alien = store.create_entry(new_entry("alien")).await.unwrap();
        store.create_entry(new_entry("heat")).await.unwrap();
        let dune = store.create_entry(new_entry("dune")).await.unwrap();
        store.create_entry(new_entry("jaws")).await.unwrap();
        store.update_count(&dune.id, 5).await.unwrap();
        store.update_count(&alien.id, 2).await.unwrap();

        let top = store.top_by_count(3).await.unwrap();
        let terms: Vec<&str> = top.iter().map(|e| e.search_term.as_str()).collect();

        assert_eq!(terms, vec!["dune", "alien", "heat"]);
        assert_eq!(store.len(), 4);
    }
}
