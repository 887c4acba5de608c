//! OpenSearch client implementation.
//!
//! Each trait method maps to exactly one indices API call. Non-success
//! responses are converted into [`ClientError`] values embedding the status
//! and response body text.

use async_trait::async_trait;
use opensearch::http::response::Response;
use opensearch::indices::{
    IndicesCreateParts, IndicesDeleteAliasParts, IndicesDeleteParts, IndicesExistsParts,
    IndicesPutAliasParts, IndicesPutMappingParts,
};
use opensearch::OpenSearch;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::ClientError;
use crate::interfaces::SearchEngineClient;

/// OpenSearch-backed implementation of [`SearchEngineClient`].
pub struct OpenSearchAdminClient {
    client: OpenSearch,
}

impl OpenSearchAdminClient {
    /// Wrap a fully configured OpenSearch client.
    ///
    /// Transport construction lives in the connection factory; this type
    /// only issues the administrative API calls.
    pub fn new(client: OpenSearch) -> Self {
        Self { client }
    }

    /// Convert a non-success response into an error carrying the body text.
    async fn ensure_success(response: Response, what: &str) -> Result<(), ClientError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "{} request failed", what);
        Err(ClientError::unexpected_status(status.as_u16(), body))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchAdminClient {
    async fn index_exists(&self, index: &str) -> Result<bool, ClientError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 404 {
            return Ok(false);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Exists request failed");
        Err(ClientError::unexpected_status(status.as_u16(), body))
    }

    async fn create_index(&self, index: &str, body: Option<&Value>) -> Result<(), ClientError> {
        let result = match body {
            Some(body) => {
                self.client
                    .indices()
                    .create(IndicesCreateParts::Index(index))
                    .body(body)
                    .send()
                    .await
            }
            None => {
                self.client
                    .indices()
                    .create(IndicesCreateParts::Index(index))
                    .send()
                    .await
            }
        };

        let response = result.map_err(|e| ClientError::request(e.to_string()))?;
        Self::ensure_success(response, "Create index").await?;

        debug!(index = %index, "Index created");
        Ok(())
    }

    async fn put_mapping(&self, index: &str, body: &Value) -> Result<(), ClientError> {
        let response = self
            .client
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        Self::ensure_success(response, "Put mapping").await?;

        debug!(index = %index, "Mapping updated");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        Self::ensure_success(response, "Delete index").await?;

        debug!(index = %index, "Index deleted");
        Ok(())
    }

    async fn put_alias(&self, index: &str, alias: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .indices()
            .put_alias(IndicesPutAliasParts::IndexName(&[index], alias))
            .send()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        Self::ensure_success(response, "Put alias").await?;

        debug!(index = %index, alias = %alias, "Alias linked");
        Ok(())
    }

    async fn delete_alias(&self, index: &str, alias: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .indices()
            .delete_alias(IndicesDeleteAliasParts::IndexName(&[index], &[alias]))
            .send()
            .await
            .map_err(|e| ClientError::request(e.to_string()))?;

        Self::ensure_success(response, "Delete alias").await?;

        debug!(index = %index, alias = %alias, "Alias unlinked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_endpoints_address_index_and_alias() {
        let put = IndicesPutAliasParts::IndexName(&["products"], "live").url();
        assert!(put.contains("products"));
        assert!(put.contains("live"));

        // Delete alias takes the alias names as a slice.
        let delete = IndicesDeleteAliasParts::IndexName(&["products"], &["live"]).url();
        assert!(delete.contains("products"));
        assert!(delete.contains("live"));
    }
}
