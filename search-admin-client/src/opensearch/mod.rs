//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

mod client;

pub use client::OpenSearchAdminClient;
