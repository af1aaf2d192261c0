//! Search state and its transitions.
//!
//! [`SearchSession`] is the only writer of [`SearchState`]. Every transition
//! is a method here, and the outside world only ever sees [`ViewSnapshot`]
//! copies.

use reelscout_search::{FetchError, Movie};
use reelscout_trending::TrendingEntry;
use serde::Serialize;

/// Message shown for any failed catalog fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Transient view state of the search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// Raw input, updated on every keystroke
    pub search_term: String,
    /// Last committed term, the one results belong to
    pub debounced_search_term: String,
    /// Results of the last successful fetch
    pub movies: Vec<Movie>,
    /// True from fetch start until the current cycle settles
    pub is_loading: bool,
    /// User-facing error of the last settled cycle, empty on success
    pub error_message: String,
}

/// Read-only copy of everything the view renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewSnapshot {
    /// Search input and results
    pub search: SearchState,
    /// Most searched terms
    pub trending: Vec<TrendingEntry>,
    /// Number of fetch cycles started so far
    pub generation: u64,
}

impl ViewSnapshot {
    /// Whether the results area should show the error instead of movies.
    pub fn shows_error(&self) -> bool {
        !self.search.is_loading && !self.search.error_message.is_empty()
    }
}

/// What applying a fetch outcome did.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// Outcome belonged to the current cycle and was applied.
    Applied {
        /// Search to count in analytics: the term and its first result
        record: Option<(String, Movie)>,
    },
    /// Outcome belonged to a superseded cycle and was dropped.
    Stale {
        /// Generation the outcome was issued under
        generation: u64,
    },
}

/// Owner of the search state machine.
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    trending: Vec<TrendingEntry>,
    generation: u64,
}

impl SearchSession {
    /// Creates a session with empty input and no cycle started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records raw input. Does not start a fetch.
    pub fn input(&mut self, raw: &str) {
        self.state.search_term = raw.to_string();
    }

    /// Starts a fetch cycle for a committed term.
    ///
    /// Returns the new cycle's generation, or `None` when `term` equals the
    /// currently committed term and a cycle has already run for it.
    pub fn begin_cycle(&mut self, term: &str) -> Option<u64> {
        if self.generation > 0 && self.state.debounced_search_term == term {
            return None;
        }

        self.generation += 1;
        self.state.debounced_search_term = term.to_string();
        self.state.error_message.clear();
        self.state.is_loading = true;
        Some(self.generation)
    }

    /// Applies the outcome of the fetch issued under `generation`.
    ///
    /// Outcomes of superseded cycles change nothing. On success the results
    /// replace the previous ones; on failure the previous results stay and
    /// the error message is set. Either way loading ends.
    pub fn settle(&mut self, generation: u64, outcome: Result<Vec<Movie>, FetchError>) -> Settled {
        if generation != self.generation {
            return Settled::Stale { generation };
        }

        self.state.is_loading = false;
        match outcome {
            Ok(movies) => {
                let term = &self.state.debounced_search_term;
                let record = match movies.first() {
                    Some(top) if !term.is_empty() => Some((term.clone(), top.clone())),
                    _ => None,
                };
                self.state.movies = movies;
                self.state.error_message.clear();
                Settled::Applied { record }
            }
            Err(_) => {
                self.state.error_message = FETCH_FAILED_MESSAGE.to_string();
                Settled::Applied { record: None }
            }
        }
    }

    /// Replaces the trending list.
    pub fn set_trending(&mut self, entries: Vec<TrendingEntry>) {
        self.trending = entries;
    }

    /// Generation of the most recently started cycle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current search state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Copies the state for rendering.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            search: self.state.clone(),
            trending: self.trending.clone(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use reelscout_search::ScriptedCatalog;

    use super::*;

    fn movies(count: u64) -> Vec<Movie> {
        (1..=count)
            .map(|id| ScriptedCatalog::movie(id, &format!("Movie {id}")))
            .collect()
    }

    fn http_error() -> FetchError {
        FetchError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    #[test]
    fn test_initial_cycle_for_empty_term() {
        let mut session = SearchSession::new();

        assert_eq!(session.begin_cycle(""), Some(1));
        assert!(session.state().is_loading);
        // the same committed term does not start another cycle
        assert_eq!(session.begin_cycle(""), None);
    }

    #[test]
    fn test_success_with_results() {
        let mut session = SearchSession::new();
        let generation = session.begin_cycle("dune").unwrap();

        let settled = session.settle(generation, Ok(movies(3)));

        let state = session.state();
        assert_eq!(state.movies.len(), 3);
        assert_eq!(state.error_message, "");
        assert!(!state.is_loading);
        assert_eq!(
            settled,
            Settled::Applied {
                record: Some(("dune".to_string(), ScriptedCatalog::movie(1, "Movie 1")))
            }
        );
    }

    #[test]
    fn test_empty_term_never_records() {
        let mut session = SearchSession::new();
        let generation = session.begin_cycle("").unwrap();

        let settled = session.settle(generation, Ok(movies(20)));

        assert_eq!(settled, Settled::Applied { record: None });
    }

    #[test]
    fn test_empty_results_never_record() {
        let mut session = SearchSession::new();
        let generation = session.begin_cycle("zzz").unwrap();

        let settled = session.settle(generation, Ok(Vec::new()));

        assert_eq!(settled, Settled::Applied { record: None });
        assert!(session.state().movies.is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_movies() {
        let mut session = SearchSession::new();
        let first = session.begin_cycle("").unwrap();
        session.settle(first, Ok(movies(4)));

        let second = session.begin_cycle("broken").unwrap();
        assert_eq!(session.state().error_message, "");
        let settled = session.settle(second, Err(http_error()));

        let state = session.state();
        assert_eq!(settled, Settled::Applied { record: None });
        assert_eq!(state.movies, movies(4));
        assert_eq!(state.error_message, FETCH_FAILED_MESSAGE);
        assert!(!state.is_loading);
        assert!(session.snapshot().shows_error());
    }

    #[test]
    fn test_new_cycle_clears_error() {
        let mut session = SearchSession::new();
        let failed = session.begin_cycle("broken").unwrap();
        session.settle(failed, Err(http_error()));

        session.begin_cycle("dune").unwrap();

        assert_eq!(session.state().error_message, "");
        assert!(session.state().is_loading);
        assert!(!session.snapshot().shows_error());
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut session = SearchSession::new();
        let slow = session.begin_cycle("alien").unwrap();
        let fast = session.begin_cycle("aliens").unwrap();

        assert_eq!(session.settle(fast, Ok(movies(2))), Settled::Applied {
            record: Some(("aliens".to_string(), ScriptedCatalog::movie(1, "Movie 1")))
        });
        let before = session.snapshot();

        assert_eq!(
            session.settle(slow, Ok(movies(9))),
            Settled::Stale { generation: slow }
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_stale_outcome_does_not_end_loading() {
        let mut session = SearchSession::new();
        let slow = session.begin_cycle("alien").unwrap();
        session.begin_cycle("aliens").unwrap();

        session.settle(slow, Err(http_error()));

        assert!(session.state().is_loading);
        assert_eq!(session.state().error_message, "");
    }

    #[test]
    fn test_input_does_not_touch_committed_term() {
        let mut session = SearchSession::new();
        session.begin_cycle("");

        session.input("du");

        assert_eq!(session.state().search_term, "du");
        assert_eq!(session.state().debounced_search_term, "");
        assert_eq!(session.generation(), 1);
    }
}
