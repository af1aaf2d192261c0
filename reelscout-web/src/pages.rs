//! Full page handlers
//!
//! The home page composes the hero, trending and results components around
//! the latest controller snapshot.

use axum::extract::State;
use axum::response::Html;

use crate::components::{all_movies_section, hero, page_shell, trending_section};
use crate::server::AppState;
use crate::state::ViewSnapshot;

/// Renders the home page for `snapshot`.
pub fn render_home(snapshot: &ViewSnapshot, image_base: &str) -> String {
    let content = format!(
        "{}\n{}\n{}",
        hero(&snapshot.search.search_term),
        trending_section(&snapshot.trending),
        all_movies_section(&snapshot.search, image_base)
    );

    page_shell("Reelscout", &content)
}

/// Serves the home page.
pub async fn home_page(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot();
    Html(render_home(&snapshot, &state.image_base_url))
}

#[cfg(test)]
mod tests {
    use reelscout_search::ScriptedCatalog;

    use super::*;

    #[test]
    fn test_home_page_sections() {
        let mut snapshot = ViewSnapshot::default();
        snapshot.search.search_term = "heat".to_string();
        snapshot.search.movies = vec![ScriptedCatalog::movie(949, "Heat")];

        let html = render_home(&snapshot, "https://image.tmdb.org/t/p");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"value="heat""#));
        assert!(html.contains(r#"id="trending""#));
        assert!(!html.contains("Trending Movies"));
        assert!(html.contains(">Heat</h3>"));
    }
}
