//! TMDB catalog provider for production use.

use async_trait::async_trait;
use reelscout_core::config::CatalogConfig;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use super::MovieCatalog;
use crate::errors::FetchError;
use crate::types::{CatalogQuery, CatalogResponse, Movie};

/// TMDB provider issuing authenticated GET requests against the v3 API.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Error envelope TMDB returns alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

impl TmdbCatalog {
    /// Creates a provider from catalog configuration.
    ///
    /// # Errors
    /// - `FetchError::MissingApiKey` - No API key configured
    /// - `FetchError::Transport` - HTTP client could not be built
    pub fn from_config(config: &CatalogConfig) -> Result<Self, FetchError> {
        let api_key = config.api_key.clone().ok_or(FetchError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| FetchError::Transport {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self::with_client(client, &config.base_url, api_key))
    }

    /// Creates a provider around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Absolute URL for `query`.
    pub fn endpoint(&self, query: &CatalogQuery) -> String {
        format!("{}{}", self.base_url, query.path_and_query())
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn fetch_movies(&self, query: &CatalogQuery) -> Result<Vec<Movie>, FetchError> {
        let url = self.endpoint(query);
        tracing::debug!(provider = "tmdb", url = %url, "Requesting movies");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status_message(status, &body),
            });
        }

        let body = response.text().await?;
        let parsed: CatalogResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                reason: e.to_string(),
            })?;

        Ok(parsed.into_movies())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

/// Extracts TMDB's `status_message`, falling back to the canonical reason.
fn status_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<TmdbErrorBody>(body)
        .ok()
        .and_then(|error| error.status_message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string())
}
