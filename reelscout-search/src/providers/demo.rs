//! Demo provider implementation for development.

use std::time::Duration;

use async_trait::async_trait;

use super::MovieCatalog;
use crate::errors::FetchError;
use crate::types::{CatalogQuery, Movie};

/// Built-in sample catalog for running without an API key.
///
/// Discover returns every title by popularity; search is a case-insensitive
/// substring match on the title. An optional latency makes the loading state
/// visible in the UI.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    movies: Vec<Movie>,
    latency: Duration,
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoCatalog {
    /// Creates the demo catalog with no artificial latency.
    pub fn new() -> Self {
        Self {
            movies: sample_movies(),
            latency: Duration::ZERO,
        }
    }

    /// Delays every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl MovieCatalog for DemoCatalog {
    async fn fetch_movies(&self, query: &CatalogQuery) -> Result<Vec<Movie>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut movies: Vec<Movie> = match query {
            CatalogQuery::Discover => self.movies.clone(),
            CatalogQuery::Search(term) => {
                let needle = term.to_lowercase();
                self.movies
                    .iter()
                    .filter(|movie| movie.title.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        };

        if *query == CatalogQuery::Discover {
            movies.sort_by(|a, b| {
                b.popularity
                    .unwrap_or_default()
                    .total_cmp(&a.popularity.unwrap_or_default())
            });
        }

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}

fn sample_movies() -> Vec<Movie> {
    let entries: [(u64, &str, f64, &str, &str, f64); 8] = [
        (438631, "Dune", 7.8, "en", "2021-09-15", 310.5),
        (693134, "Dune: Part Two", 8.2, "en", "2024-02-27", 402.1),
        (27205, "Inception", 8.4, "en", "2010-07-15", 120.7),
        (157336, "Interstellar", 8.4, "en", "2014-11-05", 188.3),
        (129, "Spirited Away", 8.5, "ja", "2001-07-20", 95.2),
        (194, "Amélie", 7.9, "fr", "2001-04-25", 40.9),
        (496243, "Parasite", 8.5, "ko", "2019-05-30", 80.4),
        (335984, "Blade Runner 2049", 7.6, "en", "2017-10-04", 77.6),
    ];

    entries
        .into_iter()
        .map(|(id, title, rating, language, date, popularity)| Movie {
            id,
            title: title.to_string(),
            poster_path: None,
            vote_average: Some(rating),
            original_language: Some(language.to_string()),
            release_date: Some(date.to_string()),
            overview: Some(format!("Demo entry for {title}")),
            popularity: Some(popularity),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_discover_sorted_by_popularity() {
        let catalog = DemoCatalog::new();
        let movies = catalog.fetch_movies(&CatalogQuery::Discover).await.unwrap();

        assert_eq!(movies.len(), 8);
        assert_eq!(movies[0].title, "Dune: Part Two");
        assert!(
            movies
                .windows(2)
                .all(|pair| pair[0].popularity >= pair[1].popularity)
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let catalog = DemoCatalog::new();
        let movies = catalog
            .fetch_movies(&CatalogQuery::from_term("DUNE"))
            .await
            .unwrap();

        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Dune: Part Two"]);
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty() {
        let catalog = DemoCatalog::new();
        let movies = catalog
            .fetch_movies(&CatalogQuery::from_term("zzz"))
            .await
            .unwrap();

        assert!(movies.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_delays_response() {
        let catalog = DemoCatalog::new().with_latency(Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        catalog.fetch_movies(&CatalogQuery::Discover).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
