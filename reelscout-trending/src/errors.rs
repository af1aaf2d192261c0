//! Error types for the analytics store.

use thiserror::Error;

/// Errors raised by trending store reads and writes.
///
/// These never reach the user; callers log them and carry on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Request never produced an HTTP response.
    #[error("Network error: {reason}")]
    Transport {
        /// The reason for the transport failure
        reason: String,
    },

    /// Backend answered with a non-success status.
    #[error("Analytics backend returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Backend-provided message
        message: String,
    },

    /// Backend response could not be decoded.
    #[error("Failed to decode analytics response: {reason}")]
    Decode {
        /// The reason for the decode failure
        reason: String,
    },

    /// Store is missing required settings.
    #[error("Analytics store misconfigured: {reason}")]
    Configuration {
        /// What is missing or invalid
        reason: String,
    },

    /// Update targeted an entry that does not exist.
    #[error("Trending entry {id} not found")]
    EntryNotFound {
        /// Entry identifier
        id: String,
    },
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            AnalyticsError::Decode {
                reason: error.to_string(),
            }
        } else {
            AnalyticsError::Transport {
                reason: error.to_string(),
            }
        }
    }
}
