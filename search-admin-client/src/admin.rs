//! Administrative index and alias operations.
//!
//! Every operation follows the same shape: validate string arguments, probe
//! the existence precondition where one applies, issue exactly one mutating
//! remote call, and report a single human-readable line. Remote failures are
//! caught at this boundary and embedded verbatim in the failure message;
//! they never propagate further.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::errors::OpError;
use crate::interfaces::SearchEngineClient;

/// Administrative operations over one connection.
///
/// The `Ok` value of every method is the success message to report; the
/// `Err` value's `Display` is the failure message. The `index_exists`
/// operation is the one exception that reports success for both existence
/// states.
pub struct IndexAdmin {
    client: Arc<dyn SearchEngineClient>,
}

impl IndexAdmin {
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self { client }
    }

    /// Reject an empty string argument before any remote call is made.
    fn require(name: &str, value: &str) -> Result<(), OpError> {
        if value.is_empty() {
            return Err(OpError::invalid_argument(name));
        }
        Ok(())
    }

    /// Create an index. Fails if the index already exists.
    pub async fn create_index(&self, index: &str) -> Result<String, OpError> {
        Self::require("index-name", index)?;

        let exists = self.client.index_exists(index).await.map_err(|e| {
            OpError::remote(format!(
                "Error creating index {}, exception message: {}.",
                index, e
            ))
        })?;
        if exists {
            return Err(OpError::precondition(format!(
                "Index {} already exists and cannot be created.",
                index
            )));
        }

        match self.client.create_index(index, None).await {
            Ok(()) => {
                info!(index = %index, "Index created");
                Ok(format!("Index {} created.", index))
            }
            Err(e) => Err(OpError::remote(format!(
                "Error creating index {}, exception message: {}.",
                index, e
            ))),
        }
    }

    /// Create an index with the mapping file as its body, or update the
    /// mappings of an existing index from the same file.
    ///
    /// The file must exist and hold a strictly valid JSON document; read and
    /// parse failures surface through the same failure template as the
    /// remote call.
    pub async fn create_or_update_mapping(
        &self,
        index: &str,
        mapping_file_path: &str,
    ) -> Result<String, OpError> {
        Self::require("index-name", index)?;
        if mapping_file_path.is_empty() || !Path::new(mapping_file_path).is_file() {
            return Err(OpError::InvalidMappingPath);
        }

        let remote = |e: &dyn std::fmt::Display| {
            OpError::remote(format!(
                "Error creating or updating mapping for index {}, given mapping file: {} - error message: {}.",
                index, mapping_file_path, e
            ))
        };

        let exists = self
            .client
            .index_exists(index)
            .await
            .map_err(|e| remote(&e))?;

        let raw = fs::read_to_string(mapping_file_path).map_err(|e| remote(&e))?;
        let body: Value = serde_json::from_str(&raw).map_err(|e| remote(&e))?;

        if !exists {
            self.client
                .create_index(index, Some(&body))
                .await
                .map_err(|e| remote(&e))?;

            info!(index = %index, file = %mapping_file_path, "Index created from mapping file");
            return Ok(format!(
                "Index {} doesn't exist, a new index was created with mapping/settings using file {}.",
                index, mapping_file_path
            ));
        }

        self.client
            .put_mapping(index, &body)
            .await
            .map_err(|e| remote(&e))?;

        info!(index = %index, file = %mapping_file_path, "Mapping updated from file");
        Ok(format!(
            "Mapping created or updated for index {} using file {}.",
            index, mapping_file_path
        ))
    }

    /// Delete an index. Fails if the index does not exist.
    pub async fn delete_index(&self, index: &str) -> Result<String, OpError> {
        Self::require("index-name", index)?;

        let exists = self.client.index_exists(index).await.map_err(|e| {
            OpError::remote(format!(
                "Error deleting index {}, exception message: {}.",
                index, e
            ))
        })?;
        if !exists {
            return Err(OpError::precondition(format!(
                "Index {} doesn't exists and cannot be deleted.",
                index
            )));
        }

        match self.client.delete_index(index).await {
            Ok(()) => {
                info!(index = %index, "Index deleted");
                Ok(format!("Index {} deleted.", index))
            }
            Err(e) => Err(OpError::remote(format!(
                "Error deleting index {}, exception message: {}.",
                index, e
            ))),
        }
    }

    /// Report whether an index exists. Both outcomes are successes; only a
    /// bad argument or a failing probe is a failure.
    pub async fn index_exists(&self, index: &str) -> Result<String, OpError> {
        Self::require("index-name", index)?;

        let exists = self.client.index_exists(index).await.map_err(|e| {
            OpError::remote(format!(
                "Error checking index {} existence, exception message: {}.",
                index, e
            ))
        })?;

        if exists {
            Ok(format!("Index {} exists.", index))
        } else {
            Ok(format!("Index {} doesn't exists.", index))
        }
    }

    /// Point an alias at an index. Fails if the index does not exist.
    pub async fn create_alias(&self, index: &str, alias: &str) -> Result<String, OpError> {
        Self::require("index-name", index)?;
        Self::require("alias-name", alias)?;

        let exists = self.client.index_exists(index).await.map_err(|e| {
            OpError::remote(format!(
                "Error creating alias {} for index {}, exception message: {}.",
                alias, index, e
            ))
        })?;
        if !exists {
            return Err(OpError::precondition(format!(
                "Index {} doesn't exists and alias cannot be created.",
                index
            )));
        }

        match self.client.put_alias(index, alias).await {
            Ok(()) => {
                info!(index = %index, alias = %alias, "Alias created");
                Ok(format!("Alias {} created for index {}.", alias, index))
            }
            Err(e) => Err(OpError::remote(format!(
                "Error creating alias {} for index {}, exception message: {}.",
                alias, index, e
            ))),
        }
    }

    /// Remove an index from an alias. Fails if the index does not exist.
    pub async fn remove_alias(&self, index: &str, alias: &str) -> Result<String, OpError> {
        Self::require("index-name", index)?;
        Self::require("alias-name", alias)?;

        let exists = self.client.index_exists(index).await.map_err(|e| {
            OpError::remote(format!(
                "Error removing index {} from alias {}, exception message: {}.",
                index, alias, e
            ))
        })?;
        if !exists {
            return Err(OpError::precondition(format!(
                "Index {} doesn't exists and cannot be removed from alias.",
                index
            )));
        }

        match self.client.delete_alias(index, alias).await {
            Ok(()) => {
                info!(index = %index, alias = %alias, "Index removed from alias");
                Ok(format!("Index {} removed from alias {}.", index, alias))
            }
            Err(e) => Err(OpError::remote(format!(
                "Error removing index {} from alias {}, exception message: {}.",
                index, alias, e
            ))),
        }
    }

    /// Switch an alias from one index to another.
    ///
    /// The new index must exist; the old one is not validated. The new link
    /// is always established before the old one is removed, so the alias
    /// never resolves to neither index (it may briefly resolve to both).
    pub async fn switch_alias(
        &self,
        new_index: &str,
        old_index: &str,
        alias: &str,
    ) -> Result<String, OpError> {
        Self::require("new-index-name", new_index)?;
        Self::require("old-index-name", old_index)?;
        Self::require("alias-name", alias)?;

        let remote = |e: &dyn std::fmt::Display| {
            OpError::remote(format!(
                "Error switching indexes - new index: {}, old index: {} in alias {}, exception message: {}.",
                new_index, old_index, alias, e
            ))
        };

        let exists = self
            .client
            .index_exists(new_index)
            .await
            .map_err(|e| remote(&e))?;
        if !exists {
            return Err(OpError::precondition(format!(
                "Index {} cannot be linked to alias because doesn't exists.",
                new_index
            )));
        }

        self.client
            .put_alias(new_index, alias)
            .await
            .map_err(|e| remote(&e))?;
        self.client
            .delete_alias(old_index, alias)
            .await
            .map_err(|e| remote(&e))?;

        info!(new_index = %new_index, old_index = %old_index, alias = %alias, "Alias switched");
        Ok(format!(
            "New index {} linked and old index {} removed from alias {}.",
            new_index, old_index, alias
        ))
    }
}
