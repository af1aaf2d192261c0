//! Appwrite store against a local stub of the Databases REST API.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use reelscout_core::config::AppwriteConfig;
use reelscout_search::ScriptedCatalog;
use reelscout_trending::{
    AnalyticsError, AppwriteStore, NewTrendingEntry, TrendingService, TrendingStore,
};
use serde_json::{Value, json};

use crate::support::{RecordedRequest, StubServer};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const DOCUMENTS_PATH: &str = "/v1/databases/main/collections/metrics/documents";

fn store_for(stub: &StubServer) -> AppwriteStore {
    let config = AppwriteConfig {
        endpoint: stub.url("/v1"),
        project_id: Some("reelscout".to_string()),
        database_id: Some("main".to_string()),
        collection_id: Some("metrics".to_string()),
        api_key: Some("server-key".to_string()),
        ..AppwriteConfig::default()
    };
    AppwriteStore::from_config(&config).unwrap()
}

fn document(id: &str, term: &str, count: u64) -> Value {
    json!({
        "$id": id,
        "$collectionId": "metrics",
        "$databaseId": "main",
        "$createdAt": "2024-06-04T10:15:30.000+00:00",
        "$updatedAt": "2024-06-04T10:15:30.000+00:00",
        "$permissions": [],
        "searchTerm": term,
        "count": count,
        "poster_url": format!("{IMAGE_BASE}/w500/{term}.jpg"),
        "movie_id": 1
    })
}

fn parsed_queries(request: &RecordedRequest) -> Vec<Value> {
    request
        .query_pairs()
        .into_iter()
        .filter(|(key, _)| key == "queries[]")
        .map(|(_, value)| serde_json::from_str(&value).unwrap())
        .collect()
}

#[tokio::test]
async fn test_find_by_term_queries_exact_match() {
    let stub = StubServer::start(|_| {
        (
            StatusCode::OK,
            json!({"total": 1, "documents": [document("doc-1", "dune", 3)]}),
        )
    })
    .await;
    let store = store_for(&stub);

    let found = store.find_by_term("dune").await.unwrap().unwrap();

    assert_eq!(found.id, "doc-1");
    assert_eq!(found.count, 3);
    assert!(found.created_at.is_some());

    let request = &stub.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, DOCUMENTS_PATH);
    assert_eq!(request.header("x-appwrite-project"), Some("reelscout"));
    assert_eq!(request.header("x-appwrite-key"), Some("server-key"));
    assert_eq!(
        parsed_queries(request),
        vec![
            json!({"method": "equal", "attribute": "searchTerm", "values": ["dune"]}),
            json!({"method": "limit", "values": [1]}),
        ]
    );
}

#[tokio::test]
async fn test_find_by_term_without_match() {
    let stub = StubServer::start(|_| (StatusCode::OK, json!({"total": 0, "documents": []}))).await;
    let store = store_for(&stub);

    assert_eq!(store.find_by_term("nothing").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_entry_posts_document() {
    let stub = StubServer::start(|request| {
        let data = &request.json()["data"];
        let term = data["searchTerm"].as_str().unwrap_or_default().to_string();
        (StatusCode::CREATED, document("doc-new", &term, 1))
    })
    .await;
    let store = store_for(&stub);
    let entry = NewTrendingEntry::from_top_result(
        "dune",
        &ScriptedCatalog::movie(438631, "Dune"),
        IMAGE_BASE,
    );

    let created = store.create_entry(entry).await.unwrap();

    assert_eq!(created.id, "doc-new");
    assert_eq!(created.count, 1);

    let request = &stub.requests()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, DOCUMENTS_PATH);
    assert_eq!(
        request.json(),
        json!({
            "documentId": "unique()",
            "data": {
                "searchTerm": "dune",
                "count": 1,
                "poster_url": "https://image.tmdb.org/t/p/w500/poster-438631.jpg",
                "movie_id": 438631
            }
        })
    );
}

#[tokio::test]
async fn test_update_count_patches_document() {
    let stub = StubServer::start(|_| (StatusCode::OK, document("doc-1", "dune", 4))).await;
    let store = store_for(&stub);

    let updated = store.update_count("doc-1", 4).await.unwrap();

    assert_eq!(updated.count, 4);
    let request = &stub.requests()[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, format!("{DOCUMENTS_PATH}/doc-1"));
    assert_eq!(request.json(), json!({"data": {"count": 4}}));
}

#[tokio::test]
async fn test_update_missing_document() {
    let stub = StubServer::start(|_| {
        (
            StatusCode::NOT_FOUND,
            json!({"message": "Document with the requested ID could not be found.", "code": 404}),
        )
    })
    .await;
    let store = store_for(&stub);

    let error = store.update_count("gone", 2).await.unwrap_err();

    assert_eq!(
        error,
        AnalyticsError::EntryNotFound {
            id: "gone".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_status_carries_backend_message() {
    let stub = StubServer::start(|_| {
        (
            StatusCode::UNAUTHORIZED,
            json!({"message": "Invalid API key", "code": 401, "type": "user_unauthorized"}),
        )
    })
    .await;
    let store = store_for(&stub);

    let error = store.top_by_count(5).await.unwrap_err();

    assert_eq!(
        error,
        AnalyticsError::Status {
            status: 401,
            message: "Invalid API key".to_string()
        }
    );
}

#[tokio::test]
async fn test_top_by_count_orders_and_limits() {
    let stub = StubServer::start(|_| {
        (
            StatusCode::OK,
            json!({"total": 2, "documents": [document("a", "dune", 9), document("b", "alien", 4)]}),
        )
    })
    .await;
    let store = store_for(&stub);

    let top = store.top_by_count(5).await.unwrap();

    let terms: Vec<&str> = top.iter().map(|e| e.search_term.as_str()).collect();
    assert_eq!(terms, vec!["dune", "alien"]);
    assert_eq!(
        parsed_queries(&stub.requests()[0]),
        vec![
            json!({"method": "orderDesc", "attribute": "count"}),
            json!({"method": "limit", "values": [5]}),
        ]
    );
}

#[tokio::test]
async fn test_service_increments_existing_entry() {
    let stub = StubServer::start(|request| match request.method {
        Method::GET => (
            StatusCode::OK,
            json!({"total": 1, "documents": [document("doc-1", "dune", 2)]}),
        ),
        _ => (StatusCode::OK, document("doc-1", "dune", 3)),
    })
    .await;
    let service = TrendingService::new(Arc::new(store_for(&stub)), IMAGE_BASE);

    let entry = service
        .record_search("dune", &ScriptedCatalog::movie(1, "Dune"))
        .await
        .unwrap();

    assert_eq!(entry.count, 3);
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[1].json(), json!({"data": {"count": 3}}));
    assert!(requests.iter().all(|r| r.method != Method::POST));
}
