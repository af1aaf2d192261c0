//! Reelscout Trending - Search analytics

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
//!
//! Counts how often each search term is committed and exposes the most
//! searched terms. Storage is delegated to a backend behind
//! [`TrendingStore`]; the counting rules live in [`TrendingService`].

pub mod errors;
pub mod service;
pub mod stores;
pub mod types;

pub use errors::AnalyticsError;
pub use service::{DEFAULT_TRENDING_LIMIT, TrendingService};
pub use stores::{AppwriteStore, InMemoryTrendingStore, TrendingStore};
pub use types::{NewTrendingEntry, TrendingEntry};

/// Convenience type alias for Results with AnalyticsError.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
