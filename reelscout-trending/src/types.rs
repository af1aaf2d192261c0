//! Trending entry records.
//!
//! Field names on the wire match the analytics collection's document
//! attributes (`searchTerm`, `count`, `poster_url`, `movie_id`) and the
//! backend's system attributes (`$id`, `$createdAt`, `$updatedAt`).

use chrono::{DateTime, Utc};
use reelscout_search::Movie;
use serde::{Deserialize, Serialize};

/// Aggregate record of how often a search term was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    /// Backend document identifier
    #[serde(rename = "$id")]
    pub id: String,
    /// Exact committed search term
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Number of times the term was searched
    pub count: u64,
    /// Poster of the top result when the entry was first created
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Catalog id of the top result when the entry was first created
    #[serde(default)]
    pub movie_id: Option<u64>,
    /// Creation timestamp
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Document data for a term searched for the first time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTrendingEntry {
    /// Exact committed search term
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Initial count, always 1
    pub count: u64,
    /// Denormalized poster URL of the top result
    pub poster_url: Option<String>,
    /// Catalog id of the top result
    pub movie_id: u64,
}

impl NewTrendingEntry {
    /// Builds the first record for `search_term` from its top result.
    pub fn from_top_result(search_term: &str, top_result: &Movie, image_base_url: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            count: 1,
            poster_url: top_result.poster_url(image_base_url),
            movie_id: top_result.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_reads_backend_document() {
        let json = r#"{
            "$id": "665f1c2a0012",
            "$collectionId": "metrics",
            "$databaseId": "main",
            "$createdAt": "2024-06-04T10:15:30.000+00:00",
            "$updatedAt": "2024-06-05T08:00:00.000+00:00",
            "$permissions": [],
            "searchTerm": "dune",
            "count": 4,
            "poster_url": "https://image.tmdb.org/t/p/w500/dune.jpg",
            "movie_id": 438631
        }"#;

        let entry: TrendingEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id, "665f1c2a0012");
        assert_eq!(entry.search_term, "dune");
        assert_eq!(entry.count, 4);
        assert_eq!(entry.movie_id, Some(438631));
        assert!(entry.created_at.unwrap() < entry.updated_at.unwrap());
    }

    #[test]
    fn test_new_entry_from_top_result() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": 438631, "title": "Dune", "poster_path": "/dune.jpg"}"#,
        )
        .unwrap();

        let entry = NewTrendingEntry::from_top_result("dune", &movie, "https://image.tmdb.org/t/p");
        let data = serde_json::to_value(&entry).unwrap();

        assert_eq!(data["searchTerm"], "dune");
        assert_eq!(data["count"], 1);
        assert_eq!(data["movie_id"], 438631);
        assert_eq!(data["poster_url"], "https://image.tmdb.org/t/p/w500/dune.jpg");
    }

    #[test]
    fn test_new_entry_without_poster() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();

        let entry = NewTrendingEntry::from_top_result("untitled", &movie, "https://img");

        assert_eq!(entry.poster_url, None);
    }
}
