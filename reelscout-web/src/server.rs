//! HTMX + Tailwind web server for Reelscout
//!
//! Serves the server-rendered page, HTMX partial updates and a small JSON
//! API, all backed by one search controller.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use reelscout_core::{ReelscoutConfig, RuntimeMode};
use reelscout_search::MovieSearchService;
use reelscout_trending::TrendingService;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::controller::{ControllerHandle, spawn_search_controller};
use crate::errors::WebError;
use crate::handlers::{
    api_refresh_trending, api_search, api_state, movies_fragment, submit_search, trending_fragment,
};
use crate::pages::home_page;

/// Shared state of every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the search controller
    pub controller: ControllerHandle,
    /// Base URL poster paths are resolved against
    pub image_base_url: Arc<str>,
}

impl AppState {
    /// Creates handler state around a running controller.
    pub fn new(controller: ControllerHandle, image_base_url: &str) -> Self {
        Self {
            controller,
            image_base_url: Arc::from(image_base_url),
        }
    }
}

/// Builds the application router, serving assets from `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        // Main page
        .route("/", get(home_page))
        // HTMX partial update endpoints
        .route("/htmx/search", post(submit_search))
        .route("/htmx/movies", get(movies_fragment))
        .route("/htmx/trending", get(trending_fragment))
        // JSON API endpoints
        .route("/api/state", get(api_state))
        .route("/api/search", post(api_search))
        .route("/api/trending/refresh", post(api_refresh_trending))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the web server until Ctrl-C.
///
/// Builds the catalog and analytics backends for `mode`, starts the search
/// controller and serves on the configured address.
///
/// # Errors
/// - `WebError::Catalog` - Catalog client could not be created
/// - `WebError::Analytics` - Analytics store could not be created
/// - `WebError::Bind` - Address could not be bound
/// - `WebError::Serve` - Server stopped with an I/O error
pub async fn run_server(config: ReelscoutConfig, mode: RuntimeMode) -> Result<(), WebError> {
    let search = MovieSearchService::from_runtime_mode(mode, &config.catalog)?;
    let trending = TrendingService::from_runtime_mode(mode, &config.appwrite, &config.catalog)?;
    tracing::info!(
        %mode,
        catalog = search.provider_name(),
        trending = trending.store_name(),
        "Starting search controller"
    );

    let controller = spawn_search_controller(search, trending, &config.search);
    let state = AppState::new(controller.clone(), &config.catalog.image_base_url);
    let app = build_router(state, &config.server.static_dir);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| WebError::Bind {
            address: address.clone(),
            reason: e.to_string(),
        })?;

    tracing::info!("Reelscout running on http://{address}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Serve {
            reason: e.to_string(),
        })?;

    if controller.shutdown().await.is_err() {
        tracing::debug!("Search controller already stopped");
    }
    tracing::info!("Reelscout stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
