//! Scripted provider for tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::MovieCatalog;
use crate::errors::FetchError;
use crate::types::{CatalogQuery, Movie};

/// Canned outcome for a scripted query.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Successful listing
    Movies(Vec<Movie>),
    /// Non-success HTTP status
    Status(u16),
    /// Connection failure
    Transport,
}

#[derive(Debug)]
struct Script {
    responses: HashMap<String, (ScriptedResponse, Duration)>,
    fallback: ScriptedResponse,
    calls: Vec<CatalogQuery>,
}

/// Catalog whose answers are set up by the test.
///
/// Responses are keyed by committed term, with the empty string standing for
/// the discover listing. Clones share the same script and call log.
#[derive(Debug, Clone)]
pub struct ScriptedCatalog {
    script: Arc<Mutex<Script>>,
}

impl Default for ScriptedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCatalog {
    /// Creates a catalog answering every query with an empty listing.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                responses: HashMap::new(),
                fallback: ScriptedResponse::Movies(Vec::new()),
                calls: Vec::new(),
            })),
        }
    }

    /// Answers `term` with `response` immediately.
    pub fn respond(&self, term: &str, response: ScriptedResponse) {
        self.respond_after(term, response, Duration::ZERO);
    }

    /// Answers `term` with `response` after `delay`.
    pub fn respond_after(&self, term: &str, response: ScriptedResponse, delay: Duration) {
        self.script
            .lock()
            .responses
            .insert(term.to_string(), (response, delay));
    }

    /// Answer used for terms without a scripted response.
    pub fn respond_by_default(&self, response: ScriptedResponse) {
        self.script.lock().fallback = response;
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<CatalogQuery> {
        self.script.lock().calls.clone()
    }

    /// Number of queries received so far.
    pub fn call_count(&self) -> usize {
        self.script.lock().calls.len()
    }

    /// Minimal movie record for fixtures.
    pub fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/poster-{id}.jpg")),
            vote_average: Some(7.0),
            original_language: Some("en".to_string()),
            release_date: Some("2020-01-01".to_string()),
            overview: None,
            popularity: None,
        }
    }
}

#[async_trait]
impl MovieCatalog for ScriptedCatalog {
    async fn fetch_movies(&self, query: &CatalogQuery) -> Result<Vec<Movie>, FetchError> {
        let (response, delay) = {
            let mut script = self.script.lock();
            script.calls.push(query.clone());
            let key = query.term().unwrap_or_default();
            script
                .responses
                .get(key)
                .cloned()
                .unwrap_or_else(|| (script.fallback.clone(), Duration::ZERO))
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match response {
            ScriptedResponse::Movies(movies) => Ok(movies),
            ScriptedResponse::Status(status) => Err(FetchError::Status {
                status,
                message: "scripted failure".to_string(),
            }),
            ScriptedResponse::Transport => Err(FetchError::Transport {
                reason: "scripted connection failure".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_and_call_log() {
        let catalog = ScriptedCatalog::new();
        catalog.respond(
            "dune",
            ScriptedResponse::Movies(vec![ScriptedCatalog::movie(1, "Dune")]),
        );
        catalog.respond("broken", ScriptedResponse::Status(500));

        let dune = catalog
            .fetch_movies(&CatalogQuery::from_term("dune"))
            .await
            .unwrap();
        let broken = catalog
            .fetch_movies(&CatalogQuery::from_term("broken"))
            .await;
        let discover = catalog.fetch_movies(&CatalogQuery::Discover).await.unwrap();

        assert_eq!(dune.len(), 1);
        assert!(matches!(broken, Err(FetchError::Status { status: 500, .. })));
        assert!(discover.is_empty());
        assert_eq!(catalog.call_count(), 3);
        assert_eq!(catalog.calls()[2], CatalogQuery::Discover);
    }
}
