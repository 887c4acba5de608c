//! # Search Admin
//!
//! Administrative CLI for OpenSearch indexes and aliases.
//!
//! This crate provides the command definitions, configuration loading, and
//! dependency wiring for the `search-admin` binary.

pub mod commands;
pub mod config;

pub use config::{AppSettings, Dependencies};

use thiserror::Error;

/// Errors that can occur during CLI initialization.
///
/// These represent misconfiguration and halt the invocation with a non-zero
/// status; operation-level failures are reported through exit codes instead.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Connection resolution or construction error.
    #[error("Connection error: {0}")]
    ConnectionError(#[from] search_admin_client::ConnectionError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration document could not be parsed.
    #[error("Invalid configuration document: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
