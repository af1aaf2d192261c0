//! Search controller actor loop.

use reelscout_core::Debouncer;
use reelscout_core::config::SearchConfig;
use reelscout_search::{Movie, MovieSearchService};
use reelscout_trending::TrendingService;
use tokio::sync::{mpsc, watch};

use super::commands::{ControllerCommand, ControllerEvent};
use super::handle::ControllerHandle;
use crate::state::{SearchSession, Settled, ViewSnapshot};

/// Spawns the search controller actor and returns a handle to it.
///
/// On start the controller issues the initial fetch for the empty committed
/// term (the popular listing) and loads the trending list once.
///
/// # Panics
/// Panics if called outside of a tokio runtime.
pub fn spawn_search_controller(
    search: MovieSearchService,
    trending: TrendingService,
    config: &SearchConfig,
) -> ControllerHandle {
    let (sender, receiver) = mpsc::channel(64);
    let (event_sender, event_receiver) = mpsc::unbounded_channel();
    let (debouncer, committed) = Debouncer::new(config.debounce_window);

    let session = SearchSession::new();
    let (snapshot_sender, snapshot_receiver) = watch::channel(session.snapshot());

    let controller = SearchController {
        session,
        search,
        trending,
        trending_limit: config.trending_limit,
        debouncer,
        events: event_sender,
        snapshots: snapshot_sender,
    };

    tokio::spawn(run_controller_loop(
        controller,
        receiver,
        committed,
        event_receiver,
    ));

    ControllerHandle::new(sender, snapshot_receiver)
}

/// Processes commands, committed terms and task completions one at a time.
///
/// Exits when every handle is dropped or on an explicit shutdown.
async fn run_controller_loop(
    mut controller: SearchController,
    mut commands: mpsc::Receiver<ControllerCommand>,
    mut committed: mpsc::UnboundedReceiver<String>,
    mut events: mpsc::UnboundedReceiver<ControllerEvent>,
) {
    tracing::debug!("Search controller started");
    controller.start();

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                if !controller.handle_command(command) {
                    break;
                }
            }
            Some(term) = committed.recv() => controller.commit(term),
            Some(event) = events.recv() => controller.handle_event(event),
        }
    }

    controller.debouncer.cancel();
    tracing::debug!("Search controller stopped");
}

struct SearchController {
    session: SearchSession,
    search: MovieSearchService,
    trending: TrendingService,
    trending_limit: usize,
    debouncer: Debouncer<String>,
    events: mpsc::UnboundedSender<ControllerEvent>,
    snapshots: watch::Sender<ViewSnapshot>,
}

impl SearchController {
    fn start(&mut self) {
        self.commit(String::new());
        self.load_trending();
    }

    /// Returns false when the loop should stop.
    fn handle_command(&mut self, command: ControllerCommand) -> bool {
        match command {
            ControllerCommand::SetSearchTerm { raw } => {
                tracing::trace!(raw = %raw, "Search input changed");
                self.session.input(&raw);
                self.publish();
                self.debouncer.push(raw);
                true
            }
            ControllerCommand::RefreshTrending => {
                self.load_trending();
                true
            }
            ControllerCommand::Shutdown { responder } => {
                self.debouncer.cancel();
                let _ = responder.send(());
                false
            }
        }
    }

    fn commit(&mut self, term: String) {
        let Some(generation) = self.session.begin_cycle(&term) else {
            tracing::trace!(term = %term, "Committed term unchanged, no fetch");
            return;
        };

        tracing::info!(term = %term, generation, "Fetching movies");
        self.publish();

        let search = self.search.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = search.fetch_movies(&term).await;
            let _ = events.send(ControllerEvent::FetchSettled {
                generation,
                term,
                outcome,
            });
        });
    }

    fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::FetchSettled {
                generation,
                term,
                outcome,
            } => match self.session.settle(generation, outcome) {
                Settled::Applied { record } => {
                    self.publish();
                    if let Some((term, top_result)) = record {
                        self.record_search(term, top_result);
                    }
                }
                Settled::Stale { generation } => {
                    tracing::debug!(
                        term = %term,
                        generation,
                        current = self.session.generation(),
                        "Dropping superseded fetch result"
                    );
                }
            },
            ControllerEvent::TrendingLoaded { outcome } => match outcome {
                Ok(entries) => {
                    tracing::debug!(entries = entries.len(), "Trending searches loaded");
                    self.session.set_trending(entries);
                    self.publish();
                }
                Err(e) => tracing::warn!(error = %e, "Failed to load trending searches"),
            },
        }
    }

    /// Counts the search in the background; failures are only logged.
    fn record_search(&self, term: String, top_result: Movie) {
        let trending = self.trending.clone();
        tokio::spawn(async move {
            if let Err(e) = trending.record_search(&term, &top_result).await {
                tracing::warn!(term = %term, error = %e, "Failed to record search");
            }
        });
    }

    fn load_trending(&self) {
        let trending = self.trending.clone();
        let events = self.events.clone();
        let limit = self.trending_limit;
        tokio::spawn(async move {
            let outcome = trending.get_trending(limit).await;
            let _ = events.send(ControllerEvent::TrendingLoaded { outcome });
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.session.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reelscout_search::{CatalogQuery, ScriptedCatalog, ScriptedResponse};
    use reelscout_trending::{AnalyticsError, NewTrendingEntry, TrendingEntry, TrendingStore};
    use tokio::time::sleep;

    use super::*;
    use crate::controller::ControllerError;
    use crate::state::{FETCH_FAILED_MESSAGE, ViewSnapshot};

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

    struct Harness {
        handle: ControllerHandle,
        catalog: ScriptedCatalog,
        trending: TrendingService,
    }

    fn harness(catalog: ScriptedCatalog) -> Harness {
        harness_with(catalog, TrendingService::in_memory(IMAGE_BASE))
    }

    fn harness_with(catalog: ScriptedCatalog, trending: TrendingService) -> Harness {
        let handle = spawn_search_controller(
            MovieSearchService::new(Arc::new(catalog.clone())),
            trending.clone(),
            &SearchConfig::default(),
        );
        Harness {
            handle,
            catalog,
            trending,
        }
    }

    /// Store whose backend is unreachable; logs each attempted operation.
    #[derive(Debug, Default)]
    struct UnreachableStore {
        calls: Mutex<Vec<&'static str>>,
    }

    impl UnreachableStore {
        fn fail(&self, operation: &'static str) -> AnalyticsError {
            self.calls.lock().push(operation);
            AnalyticsError::Transport {
                reason: "connection refused".to_string(),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl TrendingStore for UnreachableStore {
        async fn find_by_term(&self, _term: &str) -> Result<Option<TrendingEntry>, AnalyticsError> {
            Err(self.fail("find_by_term"))
        }

        async fn create_entry(
            &self,
            _entry: NewTrendingEntry,
        ) -> Result<TrendingEntry, AnalyticsError> {
            Err(self.fail("create_entry"))
        }

        async fn update_count(
            &self,
            _id: &str,
            _count: u64,
        ) -> Result<TrendingEntry, AnalyticsError> {
            Err(self.fail("update_count"))
        }

        async fn top_by_count(&self, _limit: usize) -> Result<Vec<TrendingEntry>, AnalyticsError> {
            Err(self.fail("top_by_count"))
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    fn settled_on(term: &'static str) -> impl FnMut(&ViewSnapshot) -> bool {
        move |snapshot| {
            snapshot.generation > 0
                && snapshot.search.debounced_search_term == term
                && !snapshot.search.is_loading
        }
    }

    async fn type_slowly(handle: &ControllerHandle, word: &str, gap: Duration) {
        for end in 1..=word.len() {
            handle.set_search_term(&word[..end]).await.unwrap();
            sleep(gap).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_uses_discover() {
        let catalog = ScriptedCatalog::new();
        catalog.respond(
            "",
            ScriptedResponse::Movies(vec![
                ScriptedCatalog::movie(1, "Popular"),
                ScriptedCatalog::movie(2, "Also Popular"),
            ]),
        );
        let h = harness(catalog);

        let snapshot = h.handle.wait_for(settled_on("")).await.unwrap();

        assert_eq!(snapshot.search.movies.len(), 2);
        assert_eq!(snapshot.search.error_message, "");
        assert_eq!(h.catalog.calls(), vec![CatalogQuery::Discover]);

        sleep(Duration::from_millis(50)).await;
        assert!(h.trending.get_trending(5).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_commits_once_and_records_search() {
        let catalog = ScriptedCatalog::new();
        catalog.respond(
            "dune",
            ScriptedResponse::Movies(vec![
                ScriptedCatalog::movie(438631, "Dune"),
                ScriptedCatalog::movie(693134, "Dune: Part Two"),
            ]),
        );
        let h = harness(catalog);
        h.handle.wait_for(settled_on("")).await.unwrap();

        type_slowly(&h.handle, "dune", Duration::from_millis(120)).await;
        let snapshot = h.handle.wait_for(settled_on("dune")).await.unwrap();

        assert_eq!(snapshot.search.search_term, "dune");
        assert_eq!(snapshot.search.movies.len(), 2);
        assert_eq!(
            h.catalog.calls(),
            vec![
                CatalogQuery::Discover,
                CatalogQuery::Search("dune".to_string())
            ]
        );

        sleep(Duration::from_millis(50)).await;
        let trending = h.trending.get_trending(5).await.unwrap();
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].search_term, "dune");
        assert_eq!(trending[0].count, 1);
        assert_eq!(trending[0].movie_id, Some(438631));
    }

    #[tokio::test(start_paused = true)]
    async fn test_raw_input_visible_before_commit() {
        let h = harness(ScriptedCatalog::new());
        h.handle.wait_for(settled_on("")).await.unwrap();

        h.handle.set_search_term("alien").await.unwrap();
        let snapshot = h
            .handle
            .wait_for(|s| s.search.search_term == "alien")
            .await
            .unwrap();

        assert_eq!(snapshot.search.debounced_search_term, "");
        assert_eq!(h.catalog.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_error_keeps_movies_and_sets_message() {
        let catalog = ScriptedCatalog::new();
        catalog.respond(
            "",
            ScriptedResponse::Movies(vec![ScriptedCatalog::movie(1, "Popular")]),
        );
        catalog.respond("broken", ScriptedResponse::Status(503));
        let h = harness(catalog);
        let before = h.handle.wait_for(settled_on("")).await.unwrap();

        h.handle.set_search_term("broken").await.unwrap();
        let snapshot = h.handle.wait_for(settled_on("broken")).await.unwrap();

        assert_eq!(snapshot.search.movies, before.search.movies);
        assert_eq!(snapshot.search.error_message, FETCH_FAILED_MESSAGE);
        assert!(!snapshot.search.is_loading);

        sleep(Duration::from_millis(50)).await;
        assert!(h.trending.get_trending(5).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_until_settled() {
        let catalog = ScriptedCatalog::new();
        catalog.respond_after(
            "heat",
            ScriptedResponse::Movies(vec![ScriptedCatalog::movie(949, "Heat")]),
            Duration::from_secs(2),
        );
        let h = harness(catalog);
        h.handle.wait_for(settled_on("")).await.unwrap();

        h.handle.set_search_term("heat").await.unwrap();
        sleep(Duration::from_millis(600)).await;

        let in_flight = h.handle.snapshot();
        assert_eq!(in_flight.search.debounced_search_term, "heat");
        assert!(in_flight.search.is_loading);

        let settled = h.handle.wait_for(settled_on("heat")).await.unwrap();
        assert_eq!(settled.search.movies[0].title, "Heat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_overwrite_newer_results() {
        let catalog = ScriptedCatalog::new();
        catalog.respond_after(
            "alien",
            ScriptedResponse::Movies(vec![ScriptedCatalog::movie(348, "Alien")]),
            Duration::from_secs(3),
        );
        catalog.respond(
            "aliens",
            ScriptedResponse::Movies(vec![ScriptedCatalog::movie(679, "Aliens")]),
        );
        let h = harness(catalog);
        h.handle.wait_for(settled_on("")).await.unwrap();

        h.handle.set_search_term("alien").await.unwrap();
        sleep(Duration::from_millis(700)).await;
        h.handle.set_search_term("aliens").await.unwrap();
        let fresh = h.handle.wait_for(settled_on("aliens")).await.unwrap();
        assert_eq!(fresh.search.movies[0].title, "Aliens");

        // let the superseded request finish
        sleep(Duration::from_secs(4)).await;

        let after = h.handle.snapshot();
        assert_eq!(after.search, fresh.search);
        let trending = h.trending.get_trending(5).await.unwrap();
        let terms: Vec<&str> = trending.iter().map(|e| e.search_term.as_str()).collect();
        assert_eq!(terms, vec!["aliens"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_committed_term_skips_fetch() {
        let h = harness(ScriptedCatalog::new());
        h.handle.wait_for(settled_on("")).await.unwrap();

        h.handle.set_search_term("x").await.unwrap();
        sleep(Duration::from_millis(100)).await;
        h.handle.set_search_term("").await.unwrap();
        sleep(Duration::from_secs(1)).await;

        assert_eq!(h.catalog.call_count(), 1);
        assert_eq!(h.handle.snapshot().generation, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_trending_publishes_entries() {
        let h = harness(ScriptedCatalog::new());
        h.handle.wait_for(settled_on("")).await.unwrap();
        let movie = ScriptedCatalog::movie(1, "Heat");
        h.trending.record_search("heat", &movie).await.unwrap();

        h.handle.refresh_trending().await.unwrap();
        let snapshot = h
            .handle
            .wait_for(|s| !s.trending.is_empty())
            .await
            .unwrap();

        assert_eq!(snapshot.trending[0].search_term, "heat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analytics_failures_stay_out_of_view() {
        let catalog = ScriptedCatalog::new();
        catalog.respond(
            "dune",
            ScriptedResponse::Movies(vec![ScriptedCatalog::movie(438631, "Dune")]),
        );
        let store = Arc::new(UnreachableStore::default());
        let h = harness_with(catalog, TrendingService::new(store.clone(), IMAGE_BASE));
        h.handle.wait_for(settled_on("")).await.unwrap();

        type_slowly(&h.handle, "dune", Duration::from_millis(120)).await;
        let snapshot = h.handle.wait_for(settled_on("dune")).await.unwrap();
        assert_eq!(snapshot.search.error_message, "");
        assert_eq!(snapshot.search.movies[0].title, "Dune");

        sleep(Duration::from_millis(50)).await;
        assert_eq!(store.calls(), vec!["top_by_count", "find_by_term"]);

        let later = h.handle.snapshot();
        assert_eq!(later.search.error_message, "");
        assert_eq!(later.search.movies.len(), 1);
        assert!(later.trending.is_empty());

        h.handle.refresh_trending().await.unwrap();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(store.calls().last(), Some(&"top_by_count"));
        assert_eq!(h.handle.snapshot().search.error_message, "");
        assert!(h.handle.snapshot().trending.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_controller() {
        let h = harness(ScriptedCatalog::new());

        h.handle.shutdown().await.unwrap();

        assert_eq!(
            h.handle.set_search_term("late").await,
            Err(ControllerError::Stopped)
        );
    }
}
