//! Errors surfaced by the web layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reelscout_search::FetchError;
use reelscout_trending::AnalyticsError;

use crate::controller::ControllerError;

/// Web server errors.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The search controller is gone; nothing can be rendered or searched.
    #[error("Search controller unavailable: {0}")]
    Controller(#[from] ControllerError),

    /// Catalog client could not be set up.
    #[error("Catalog setup failed: {0}")]
    Catalog(#[from] FetchError),

    /// Analytics store could not be set up.
    #[error("Analytics setup failed: {0}")]
    Analytics(#[from] AnalyticsError),

    /// Listener could not bind.
    #[error("Failed to bind {address}: {reason}")]
    Bind {
        /// Address that was requested
        address: String,
        /// Underlying I/O error
        reason: String,
    },

    /// Server stopped with an I/O error.
    #[error("Server error: {reason}")]
    Serve {
        /// Underlying I/O error
        reason: String,
    },
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let (status, message) = match self {
            WebError::Controller(_) => (StatusCode::SERVICE_UNAVAILABLE, "Search is unavailable"),
            WebError::Catalog(_) | WebError::Analytics(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Service misconfigured")
            }
            WebError::Bind { .. } | WebError::Serve { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_controller_maps_to_unavailable() {
        let response = WebError::from(ControllerError::Stopped).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_bind_error_message() {
        let error = WebError::Bind {
            address: "127.0.0.1:3000".to_string(),
            reason: "address in use".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Failed to bind 127.0.0.1:3000: address in use"
        );
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
