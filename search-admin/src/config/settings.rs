//! Application settings: the named connections document.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::CliError;
use search_admin_client::ConnectionConfig;

/// Default OpenSearch URL for the environment fallback.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Name given to the connection synthesized from the environment.
const ENV_CONNECTION_NAME: &str = "default";

/// The connections document: a default connection name plus a mapping of
/// named connection configurations.
#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub default_connection: String,
    pub connections: HashMap<String, ConnectionConfig>,
}

impl AppSettings {
    /// Load settings from a configuration file, or fall back to the
    /// environment when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::from_env(),
        }
    }

    /// Parse a JSON connections document.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&raw)?;

        info!(
            path = %path.display(),
            connections = settings.connections.len(),
            "Loaded connections document"
        );

        Ok(settings)
    }

    /// Synthesize a single default connection from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    pub fn from_env() -> Result<Self, CliError> {
        let url = env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());

        let config = ConnectionConfig::from_url(&url)
            .map_err(|e| CliError::config(format!("OPENSEARCH_URL: {}", e)))?;

        info!(url = %url, "Using environment connection");

        Ok(Self {
            default_connection: ENV_CONNECTION_NAME.to_string(),
            connections: HashMap::from([(ENV_CONNECTION_NAME.to_string(), config)]),
        })
    }

    /// The logging block of the named connection (or the default one when
    /// no name is given), used to initialize the file-backed log writer.
    pub fn logging_for(&self, name: Option<&str>) -> Option<&search_admin_client::LoggingConfig> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => self.default_connection.as_str(),
        };
        self.connections.get(name)?.logging.as_ref()
    }
}
