//! TMDB client against a local stub of the v3 API.

use std::sync::Arc;

use axum::http::StatusCode;
use reelscout_search::{FetchError, MovieSearchService, TmdbCatalog};
use serde_json::json;

use crate::support::{StubServer, closed_address};

fn service_for(base_url: &str) -> MovieSearchService {
    let catalog = TmdbCatalog::with_client(reqwest::Client::new(), base_url, "test-token".to_string());
    MovieSearchService::new(Arc::new(catalog))
}

fn listing() -> serde_json::Value {
    json!({
        "page": 1,
        "results": [
            {
                "id": 438631,
                "title": "Dune",
                "poster_path": "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg",
                "vote_average": 7.8,
                "original_language": "en",
                "release_date": "2021-09-15",
                "adult": false
            },
            {
                "id": 841,
                "title": "Dune",
                "poster_path": null,
                "vote_average": 0.0,
                "original_language": "en",
                "release_date": ""
            }
        ],
        "total_pages": 1,
        "total_results": 2
    })
}

#[tokio::test]
async fn test_search_request_shape() {
    let stub = StubServer::start(|_| (StatusCode::OK, listing())).await;
    let service = service_for(&stub.url("/3"));

    let movies = service.fetch_movies("dune").await.unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Dune");
    assert_eq!(movies[0].rating_label(), "7.8");
    assert_eq!(movies[1].poster_path, None);
    assert_eq!(movies[1].release_year(), None);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/3/search/movie");
    assert_eq!(request.query_param("query").as_deref(), Some("dune"));
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_empty_term_requests_discover() {
    let stub = StubServer::start(|_| (StatusCode::OK, listing())).await;
    let service = service_for(&stub.url("/3"));

    service.fetch_movies("").await.unwrap();

    let request = &stub.requests()[0];
    assert_eq!(request.path, "/3/discover/movie");
    assert_eq!(
        request.query_param("sort_by").as_deref(),
        Some("popularity.desc")
    );
    assert_eq!(request.query_param("query"), None);
}

#[tokio::test]
async fn test_term_is_encoded() {
    let stub = StubServer::start(|_| (StatusCode::OK, json!({"results": []}))).await;
    let service = service_for(&stub.url("/3"));

    service.fetch_movies("star wars & co?").await.unwrap();

    let request = &stub.requests()[0];
    assert_eq!(
        request.query_param("query").as_deref(),
        Some("star wars & co?")
    );
    assert_eq!(request.query_pairs().len(), 1);
}

#[tokio::test]
async fn test_whitespace_term_is_searched_verbatim() {
    let stub = StubServer::start(|_| (StatusCode::OK, json!({"results": []}))).await;
    let service = service_for(&stub.url("/3"));

    service.fetch_movies("  ").await.unwrap();

    let request = &stub.requests()[0];
    assert_eq!(request.path, "/3/search/movie");
    assert_eq!(request.query_param("query").as_deref(), Some("  "));
}

#[tokio::test]
async fn test_missing_or_null_results_are_empty() {
    let stub = StubServer::start(|request| {
        let body = if request.path.ends_with("/discover/movie") {
            json!({"page": 1})
        } else {
            json!({"page": 1, "results": null})
        };
        (StatusCode::OK, body)
    })
    .await;
    let service = service_for(&stub.url("/3"));

    assert!(service.fetch_movies("").await.unwrap().is_empty());
    assert!(service.fetch_movies("nothing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_status_carries_catalog_message() {
    let stub = StubServer::start(|_| {
        (
            StatusCode::UNAUTHORIZED,
            json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
                "success": false
            }),
        )
    })
    .await;
    let service = service_for(&stub.url("/3"));

    let error = service.fetch_movies("dune").await.unwrap_err();

    assert_eq!(
        error,
        FetchError::Status {
            status: 401,
            message: "Invalid API key: You must be granted a valid key.".to_string(),
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let stub = StubServer::start(|_| (StatusCode::OK, json!({"results": "not a list"}))).await;
    let service = service_for(&stub.url("/3"));

    let error = service.fetch_movies("dune").await.unwrap_err();

    assert!(matches!(error, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_catalog_is_transport_error() {
    let service = service_for(&closed_address().await);

    let error = service.fetch_movies("dune").await.unwrap_err();

    assert!(error.is_transport());
}
