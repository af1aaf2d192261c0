//! Centralized configuration for Reelscout.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::mode::RuntimeMode;

/// Errors raised when configuration values are missing or malformed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {name}")]
    MissingValue { name: &'static str },

    #[error("Invalid URL for {name} ('{value}'): {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Central configuration for all Reelscout components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct ReelscoutConfig {
    pub catalog: CatalogConfig,
    pub appwrite: AppwriteConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Movie catalog (TMDB) client configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Image CDN root used to build poster URLs
    pub image_base_url: String,
    /// Bearer token for the catalog API
    pub api_key: Option<String>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(30),
            user_agent: "reelscout/0.1.0",
        }
    }
}

/// Appwrite backend used for search analytics.
///
/// The store is only considered configured when every identifier and the
/// API key are present.
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: None,
            database_id: None,
            collection_id: None,
            api_key: None,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl AppwriteConfig {
    /// Whether all identifiers needed to reach the collection are set.
    pub fn is_configured(&self) -> bool {
        self.project_id.is_some()
            && self.database_id.is_some()
            && self.collection_id.is_some()
            && self.api_key.is_some()
    }
}

/// Search interaction tuning.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiescence window before raw input is committed
    pub debounce_window: Duration,
    /// Number of trending entries shown
    pub trending_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(500),
            trending_limit: 5,
        }
    }
}

/// HTTP server binding and static asset location.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("reelscout-web/static"),
        }
    }
}

impl ReelscoutConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults. Unparseable numeric values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Same rules as [`ReelscoutConfig::from_env`]; used directly by tests so
    /// they do not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        // Catalog
        if let Some(api_key) = non_empty("TMDB_API_KEY") {
            config.catalog.api_key = Some(api_key);
        }
        if let Some(base_url) = non_empty("REELSCOUT_TMDB_BASE_URL") {
            config.catalog.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(seconds) = non_empty("REELSCOUT_HTTP_TIMEOUT").and_then(|v| v.parse().ok()) {
            config.catalog.request_timeout = Duration::from_secs(seconds);
            config.appwrite.request_timeout = Duration::from_secs(seconds);
        }

        // Search
        if let Some(millis) = non_empty("REELSCOUT_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            config.search.debounce_window = Duration::from_millis(millis);
        }
        if let Some(limit) = non_empty("REELSCOUT_TRENDING_LIMIT").and_then(|v| v.parse().ok()) {
            config.search.trending_limit = limit;
        }

        // Appwrite
        if let Some(endpoint) = non_empty("APPWRITE_ENDPOINT") {
            config.appwrite.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        config.appwrite.project_id = non_empty("APPWRITE_PROJECT_ID");
        config.appwrite.database_id = non_empty("APPWRITE_DATABASE_ID");
        config.appwrite.collection_id = non_empty("APPWRITE_COLLECTION_ID");
        config.appwrite.api_key = non_empty("APPWRITE_API_KEY");

        config
    }

    /// Checks that the configuration is usable for the given runtime mode.
    ///
    /// Production needs a catalog API key; development runs on built-in data.
    ///
    /// # Errors
    /// - `ConfigError::MissingValue` - Catalog API key absent in production mode
    /// - `ConfigError::InvalidUrl` - A base URL does not parse
    /// - `ConfigError::InvalidValue` - Trending limit is zero
    pub fn validate(&self, mode: RuntimeMode) -> Result<(), ConfigError> {
        check_url("REELSCOUT_TMDB_BASE_URL", &self.catalog.base_url)?;
        check_url("APPWRITE_ENDPOINT", &self.appwrite.endpoint)?;

        if mode.is_production() && self.catalog.api_key.is_none() {
            return Err(ConfigError::MissingValue {
                name: "TMDB_API_KEY",
            });
        }

        if self.search.trending_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "REELSCOUT_TRENDING_LIMIT",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Creates a configuration for fast, offline tests.
    pub fn for_testing() -> Self {
        Self {
            search: SearchConfig {
                debounce_window: Duration::from_millis(20),
                ..SearchConfig::default()
            },
            ..Default::default()
        }
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = ReelscoutConfig::default();

        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.api_key, None);
        assert_eq!(config.search.debounce_window, Duration::from_millis(500));
        assert_eq!(config.search.trending_limit, 5);
        assert_eq!(config.server.port, 3000);
        assert!(!config.appwrite.is_configured());
    }

    #[test]
    fn test_env_override() {
        let config = ReelscoutConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "secret"),
            ("REELSCOUT_TMDB_BASE_URL", "http://127.0.0.1:9000/3/"),
            ("REELSCOUT_DEBOUNCE_MS", "250"),
            ("REELSCOUT_TRENDING_LIMIT", "10"),
            ("REELSCOUT_HTTP_TIMEOUT", "5"),
            ("APPWRITE_PROJECT_ID", "project"),
            ("APPWRITE_DATABASE_ID", "db"),
            ("APPWRITE_COLLECTION_ID", "metrics"),
            ("APPWRITE_API_KEY", "key"),
        ]));

        assert_eq!(config.catalog.api_key.as_deref(), Some("secret"));
        assert_eq!(config.catalog.base_url, "http://127.0.0.1:9000/3");
        assert_eq!(config.search.debounce_window, Duration::from_millis(250));
        assert_eq!(config.search.trending_limit, 10);
        assert_eq!(config.catalog.request_timeout, Duration::from_secs(5));
        assert_eq!(config.appwrite.request_timeout, Duration::from_secs(5));
        assert!(config.appwrite.is_configured());
    }

    #[test]
    fn test_blank_and_malformed_values_ignored() {
        let config = ReelscoutConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "   "),
            ("REELSCOUT_DEBOUNCE_MS", "soon"),
        ]));

        assert_eq!(config.catalog.api_key, None);
        assert_eq!(config.search.debounce_window, Duration::from_millis(500));
    }

    #[test]
    fn test_validate_requires_api_key_in_production() {
        let config = ReelscoutConfig::default();

        assert_eq!(
            config.validate(RuntimeMode::Production),
            Err(ConfigError::MissingValue {
                name: "TMDB_API_KEY"
            })
        );
        assert!(config.validate(RuntimeMode::Development).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url_and_zero_limit() {
        let mut config = ReelscoutConfig::default();
        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(RuntimeMode::Development),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let mut config = ReelscoutConfig::default();
        config.search.trending_limit = 0;
        assert!(matches!(
            config.validate(RuntimeMode::Development),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
