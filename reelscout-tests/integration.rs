//! Integration tests for Reelscout
//!
//! Exercise the HTTP clients against local stub servers standing in for the
//! movie catalog and the analytics backend, and drive the full web stack
//! over real sockets.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/tmdb_catalog.rs"]
mod tmdb_catalog;

#[path = "integration/appwrite_store.rs"]
mod appwrite_store;

#[path = "integration/web_server.rs"]
mod web_server;

#[path = "style.rs"]
mod style;
