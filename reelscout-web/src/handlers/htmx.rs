//! HTMX handlers for partial updates
//!
//! Input goes to the controller; fragments are rendered from the latest
//! snapshot and swapped into the page by polling.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

use crate::components::{all_movies_content, trending_content};
use crate::errors::WebError;
use crate::server::AppState;

/// Form data posted by the search input.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// Raw contents of the search field
    #[serde(default)]
    pub search_term: String,
}

/// Accepts a keystroke's worth of raw input.
///
/// # Errors
/// - `WebError::Controller` - Controller has shut down
pub async fn submit_search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<StatusCode, WebError> {
    state.controller.set_search_term(form.search_term).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renders the inside of the "All Movies" section.
pub async fn movies_fragment(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot();
    Html(all_movies_content(&snapshot.search, &state.image_base_url))
}

/// Renders the trending list, empty when there is nothing trending.
pub async fn trending_fragment(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot();
    Html(trending_content(&snapshot.trending))
}
