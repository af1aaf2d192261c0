//! Full web stack over real sockets, backed by catalog and analytics stubs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use parking_lot::Mutex;
use reelscout_core::config::{AppwriteConfig, SearchConfig};
use reelscout_search::{MovieSearchService, TmdbCatalog};
use reelscout_trending::{AppwriteStore, TrendingService};
use reelscout_web::{
    AppState, ControllerHandle, FETCH_FAILED_MESSAGE, build_router, spawn_search_controller,
};
use serde_json::{Value, json};

use crate::support::{RecordedRequest, StubServer};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

fn movie(id: u64, title: &str, poster: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "poster_path": poster,
        "vote_average": 7.5,
        "original_language": "en",
        "release_date": "2021-09-15"
    })
}

fn catalog_stub_response(request: &RecordedRequest) -> (StatusCode, Value) {
    if request.path.ends_with("/discover/movie") {
        return (
            StatusCode::OK,
            json!({"results": [movie(1, "Popular Pick", "/popular.jpg")]}),
        );
    }
    match request.query_param("query").as_deref() {
        Some("dune") => (
            StatusCode::OK,
            json!({"results": [
                movie(438631, "Dune", "/dune.jpg"),
                movie(693134, "Dune: Part Two", "/dune2.jpg")
            ]}),
        ),
        Some("broken") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"status_message": "Internal error", "success": false}),
        ),
        _ => (StatusCode::OK, json!({"results": []})),
    }
}

/// Appwrite stub keeping created documents in memory.
fn analytics_stub_response(
    documents: &Mutex<Vec<Value>>,
    request: &RecordedRequest,
) -> (StatusCode, Value) {
    let mut documents = documents.lock();
    match request.method {
        Method::POST => {
            let mut document = request.json()["data"].clone();
            document["$id"] = json!(format!("doc-{}", documents.len() + 1));
            documents.push(document.clone());
            (StatusCode::CREATED, document)
        }
        Method::GET => {
            let filtered = request
                .query_pairs()
                .iter()
                .filter(|(key, _)| key == "queries[]")
                .filter_map(|(_, value)| serde_json::from_str::<Value>(value).ok())
                .find(|query| query["method"] == "equal")
                .map(|query| query["values"][0].clone());
            let matching: Vec<Value> = documents
                .iter()
                .filter(|doc| filtered.as_ref().is_none_or(|term| &doc["searchTerm"] == term))
                .cloned()
                .collect();
            (StatusCode::OK, json!({"total": matching.len(), "documents": matching}))
        }
        _ => (StatusCode::METHOD_NOT_ALLOWED, json!({"message": "unsupported"})),
    }
}

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    controller: ControllerHandle,
    catalog: StubServer,
    analytics: StubServer,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn start_app() -> TestApp {
    let catalog = StubServer::start(catalog_stub_response).await;
    let documents = Arc::new(Mutex::new(Vec::new()));
    let analytics =
        StubServer::start(move |request| analytics_stub_response(&documents, request)).await;

    let search = MovieSearchService::new(Arc::new(TmdbCatalog::with_client(
        reqwest::Client::new(),
        &catalog.url("/3"),
        "test-token".to_string(),
    )));
    let store = AppwriteStore::from_config(&AppwriteConfig {
        endpoint: analytics.url("/v1"),
        project_id: Some("reelscout".to_string()),
        database_id: Some("main".to_string()),
        collection_id: Some("metrics".to_string()),
        api_key: Some("server-key".to_string()),
        ..AppwriteConfig::default()
    })
    .unwrap();
    let trending = TrendingService::new(Arc::new(store), IMAGE_BASE);

    let controller = spawn_search_controller(
        search,
        trending,
        &SearchConfig {
            debounce_window: Duration::from_millis(200),
            ..SearchConfig::default()
        },
    );

    let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../reelscout-web/static");
    let app = build_router(AppState::new(controller.clone(), IMAGE_BASE), &static_dir);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{address}"),
        client: reqwest::Client::new(),
        controller,
        catalog,
        analytics,
        server,
    }
}

impl TestApp {
    async fn settled_on(&self, term: &'static str) {
        tokio::time::timeout(
            Duration::from_secs(5),
            self.controller.wait_for(|s| {
                s.generation > 0 && s.search.debounced_search_term == term && !s.search.is_loading
            }),
        )
        .await
        .unwrap()
        .unwrap();
    }

    async fn get_text(&self, path: &str) -> String {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.text().await.unwrap()
    }

    async fn type_term(&self, word: &str) {
        for end in 1..=word.len() {
            let response = self
                .client
                .post(format!("{}/htmx/search", self.base_url))
                .form(&[("search_term", &word[..end])])
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);
        }
    }
}

#[tokio::test]
async fn test_initial_page_lists_popular_movies() {
    let app = start_app().await;
    app.settled_on("").await;

    let html = app.get_text("/").await;

    assert!(html.contains(">Popular Pick</h3>"));
    assert!(html.contains("https://image.tmdb.org/t/p/w500/popular.jpg"));
    assert!(!html.contains("Trending Movies"));

    let requests = app.catalog.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/3/discover/movie");
    // the popular listing is never counted
    assert!(
        app.analytics
            .requests()
            .iter()
            .all(|r| r.method != Method::POST)
    );
}

#[tokio::test]
async fn test_typed_search_fetches_once_and_trends() {
    let app = start_app().await;
    app.settled_on("").await;

    app.type_term("dune").await;
    app.settled_on("dune").await;

    let catalog_paths: Vec<(String, Option<String>)> = app
        .catalog
        .requests()
        .iter()
        .map(|r| (r.path.clone(), r.query_param("query")))
        .collect();
    assert_eq!(
        catalog_paths,
        vec![
            ("/3/discover/movie".to_string(), None),
            ("/3/search/movie".to_string(), Some("dune".to_string())),
        ]
    );

    let movies = app.get_text("/htmx/movies").await;
    assert!(movies.contains(">Dune</h3>"));
    assert!(movies.contains(">Dune: Part Two</h3>"));
    assert!(!movies.contains("Popular Pick"));

    let created = app
        .analytics
        .wait_for_requests(1, |r| r.method == Method::POST)
        .await;
    assert_eq!(
        created[0].json()["data"],
        json!({
            "searchTerm": "dune",
            "count": 1,
            "poster_url": "https://image.tmdb.org/t/p/w500/dune.jpg",
            "movie_id": 438631
        })
    );

    let response = app
        .client
        .post(format!("{}/api/trending/refresh", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    tokio::time::timeout(
        Duration::from_secs(5),
        app.controller.wait_for(|s| !s.trending.is_empty()),
    )
    .await
    .unwrap()
    .unwrap();

    let trending = app.get_text("/htmx/trending").await;
    assert!(trending.contains("Trending Movies"));
    assert!(trending.contains(">1</p>"));
    assert!(trending.contains(r#"alt="dune""#));
}

#[tokio::test]
async fn test_failed_search_keeps_results_and_shows_error() {
    let app = start_app().await;
    app.settled_on("").await;

    let response = app
        .client
        .post(format!("{}/api/search", app.base_url))
        .json(&json!({"search_term": "broken"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    app.settled_on("broken").await;

    let movies = app.get_text("/htmx/movies").await;
    assert!(movies.contains(FETCH_FAILED_MESSAGE));
    assert!(!movies.contains("Popular Pick"));

    let state: Value = serde_json::from_str(&app.get_text("/api/state").await).unwrap();
    assert_eq!(state["search"]["search_term"], "broken");
    assert_eq!(state["search"]["error_message"], FETCH_FAILED_MESSAGE);
    assert_eq!(state["search"]["is_loading"], false);
    assert_eq!(state["search"]["movies"][0]["title"], "Popular Pick");
}

#[tokio::test]
async fn test_static_fallback_poster_served() {
    let app = start_app().await;

    let response = app
        .client
        .get(format!("{}/static/no-movie.svg", app.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
