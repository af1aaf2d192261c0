//! Appwrite Databases backend.
//!
//! Talks to the documents endpoint of a single collection over REST:
//! `GET` with JSON-encoded queries to list, `POST` to create and `PATCH` to
//! update. Server API keys authenticate through `X-Appwrite-Key`.

use async_trait::async_trait;
use reelscout_core::config::AppwriteConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::TrendingStore;
use crate::errors::AnalyticsError;
use crate::types::{NewTrendingEntry, TrendingEntry};

/// Backend-generated document id placeholder.
const UNIQUE_ID: &str = "unique()";

/// Trending store backed by an Appwrite collection.
#[derive(Debug, Clone)]
pub struct AppwriteStore {
    client: reqwest::Client,
    documents_url: String,
    project_id: String,
    api_key: String,
}

/// Envelope of a document list response.
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<TrendingEntry>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    message: Option<String>,
}

impl AppwriteStore {
    /// Creates a store for the configured collection.
    ///
    /// # Errors
    /// - `AnalyticsError::Configuration` - A project, database, collection id or API key is missing
    /// - `AnalyticsError::Transport` - HTTP client could not be built
    pub fn from_config(config: &AppwriteConfig) -> Result<Self, AnalyticsError> {
        let required = |value: &Option<String>, name: &str| {
            value.clone().ok_or_else(|| AnalyticsError::Configuration {
                reason: format!("{name} is not set"),
            })
        };

        let project_id = required(&config.project_id, "APPWRITE_PROJECT_ID")?;
        let database_id = required(&config.database_id, "APPWRITE_DATABASE_ID")?;
        let collection_id = required(&config.collection_id, "APPWRITE_COLLECTION_ID")?;
        let api_key = required(&config.api_key, "APPWRITE_API_KEY")?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AnalyticsError::Transport {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&database_id),
            urlencoding::encode(&collection_id),
        );

        Ok(Self {
            client,
            documents_url,
            project_id,
            api_key,
        })
    }

    /// URL of the collection's documents endpoint.
    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn list(&self, queries: &[Value]) -> Result<Vec<TrendingEntry>, AnalyticsError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_string()))
            .collect();

        let response = self
            .request(reqwest::Method::GET, &self.documents_url)
            .query(&params)
            .send()
            .await?;

        let list: DocumentList = decode(response).await?;
        Ok(list.documents)
    }
}

#[async_trait]
impl TrendingStore for AppwriteStore {
    async fn find_by_term(&self, term: &str) -> Result<Option<TrendingEntry>, AnalyticsError> {
        let documents = self
            .list(&[
                json!({"method": "equal", "attribute": "searchTerm", "values": [term]}),
                json!({"method": "limit", "values": [1]}),
            ])
            .await?;

        Ok(documents.into_iter().next())
    }

    async fn create_entry(&self, entry: NewTrendingEntry) -> Result<TrendingEntry, AnalyticsError> {
        tracing::debug!(search_term = %entry.search_term, "Creating trending document");

        let response = self
            .request(reqwest::Method::POST, &self.documents_url)
            .json(&json!({"documentId": UNIQUE_ID, "data": entry}))
            .send()
            .await?;

        decode(response).await
    }

    async fn update_count(&self, id: &str, count: u64) -> Result<TrendingEntry, AnalyticsError> {
        tracing::debug!(document_id = id, count, "Updating trending document");

        let url = format!("{}/{}", self.documents_url, urlencoding::encode(id));
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&json!({"data": {"count": count}}))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AnalyticsError::EntryNotFound { id: id.to_string() });
        }

        decode(response).await
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendingEntry>, AnalyticsError> {
        self.list(&[
            json!({"method": "orderDesc", "attribute": "count"}),
            json!({"method": "limit", "values": [limit]}),
        ])
        .await
    }

    fn name(&self) -> &'static str {
        "appwrite"
    }
}

/// Checks the status and decodes the JSON body.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AnalyticsError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<AppwriteErrorBody>(&body)
            .ok()
            .and_then(|error| error.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_string());
        return Err(AnalyticsError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| AnalyticsError::Decode {
        reason: e.to_string(),
    })
}
