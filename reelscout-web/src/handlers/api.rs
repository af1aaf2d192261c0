//! JSON API handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::errors::WebError;
use crate::server::AppState;
use crate::state::ViewSnapshot;

/// Body of `POST /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Raw search input
    pub search_term: String,
}

/// Returns the latest snapshot.
pub async fn api_state(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(state.controller.snapshot())
}

/// Feeds raw input to the controller, exactly like a keystroke.
///
/// # Errors
/// - `WebError::Controller` - Controller has shut down
pub async fn api_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<StatusCode, WebError> {
    tracing::debug!(search_term = %request.search_term, "API search input");
    state.controller.set_search_term(request.search_term).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Asks the controller to reload the trending list.
///
/// # Errors
/// - `WebError::Controller` - Controller has shut down
pub async fn api_refresh_trending(State(state): State<AppState>) -> Result<StatusCode, WebError> {
    state.controller.refresh_trending().await?;
    Ok(StatusCode::ACCEPTED)
}
