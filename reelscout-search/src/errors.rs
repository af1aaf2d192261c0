//! Error types for catalog access.

use thiserror::Error;

/// Errors that can occur while fetching movies from the catalog.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    /// Request never produced an HTTP response (connect, TLS, timeout).
    #[error("Network error: {reason}")]
    Transport {
        /// The reason for the transport failure
        reason: String,
    },

    /// Catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Catalog-provided message, or the canonical status reason
        message: String,
    },

    /// Response body was not the expected JSON document.
    #[error("Failed to decode catalog response: {reason}")]
    Decode {
        /// The reason for the decode failure
        reason: String,
    },

    /// Live catalog requested without an API key.
    #[error("Catalog API key is not configured")]
    MissingApiKey,
}

impl FetchError {
    /// Whether the failure happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::Decode {
                reason: error.to_string(),
            }
        } else {
            FetchError::Transport {
                reason: error.to_string(),
            }
        }
    }
}
