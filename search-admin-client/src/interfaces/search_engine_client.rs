//! Search engine client trait definition.
//!
//! This module defines the finite set of remote index and alias operations
//! the system needs, allowing for different backend implementations
//! (OpenSearch, mock, etc.). The set is deliberately closed: the registry
//! never exposes arbitrary methods of the underlying vendor client.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;

/// Abstract interface for index and alias administration.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ClientError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// This call never mutates remote state.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index exists
    /// * `Ok(false)` - The index does not exist
    /// * `Err(ClientError)` - If the probe itself fails
    async fn index_exists(&self, index: &str) -> Result<bool, ClientError>;

    /// Create an index, optionally with a settings/mappings body.
    async fn create_index(&self, index: &str, body: Option<&Value>) -> Result<(), ClientError>;

    /// Update the field mappings of an existing index.
    async fn put_mapping(&self, index: &str, body: &Value) -> Result<(), ClientError>;

    /// Delete an index.
    async fn delete_index(&self, index: &str) -> Result<(), ClientError>;

    /// Point an alias at an index.
    async fn put_alias(&self, index: &str, alias: &str) -> Result<(), ClientError>;

    /// Remove an index from an alias.
    async fn delete_alias(&self, index: &str, alias: &str) -> Result<(), ClientError>;
}
