//! Reelscout Core - Shared building blocks
//!
//! Centralized configuration, runtime mode selection, tracing setup and the
//! trailing-edge debounce primitive used to commit search input.

pub mod config;
pub mod debounce;
pub mod mode;
pub mod tracing_setup;

pub use config::{
    AppwriteConfig, CatalogConfig, ConfigError, ReelscoutConfig, SearchConfig, ServerConfig,
};
pub use debounce::Debouncer;
pub use mode::RuntimeMode;
