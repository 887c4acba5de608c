//! Connection manager.
//!
//! Owns the named connection configurations and a cache of built clients.
//! Connections are built lazily on first access and memoized for the life
//! of the process; nothing evicts a cached connection when its configuration
//! entry changes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::errors::{ConnectionError, ManagerError};
use crate::factory::ConnectionFactory;
use crate::interfaces::SearchEngineClient;

/// Registry of named client connections.
///
/// The cache lock is held across build-and-insert, so concurrent first
/// access to the same name performs at most one build.
pub struct ConnectionManager {
    configs: HashMap<String, ConnectionConfig>,
    default_name: String,
    factory: Box<dyn ConnectionFactory>,
    cache: Mutex<HashMap<String, Arc<dyn SearchEngineClient>>>,
}

impl ConnectionManager {
    /// Create a manager over the given configurations.
    ///
    /// The default name is not validated here; resolving an unconfigured
    /// default fails at `connection` time with a descriptive error.
    pub fn new(
        configs: HashMap<String, ConnectionConfig>,
        default_name: impl Into<String>,
        factory: Box<dyn ConnectionFactory>,
    ) -> Self {
        Self {
            configs,
            default_name: default_name.into(),
            factory,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Retrieve or build the named connection.
    ///
    /// An absent or empty name resolves to the default connection name.
    /// Resolution of an unconfigured name fails immediately; it never falls
    /// back to the default.
    pub async fn connection(
        &self,
        name: Option<&str>,
    ) -> Result<Arc<dyn SearchEngineClient>, ConnectionError> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => self.default_name.as_str(),
        };

        let mut cache = self.cache.lock().await;
        if let Some(client) = cache.get(name) {
            return Ok(Arc::clone(client));
        }

        let config = self
            .configs
            .get(name)
            .ok_or_else(|| ConnectionError::not_configured(name))?;

        debug!(connection = %name, "Building connection");
        let client = self.factory.make(config).await?;
        cache.insert(name.to_string(), Arc::clone(&client));

        Ok(client)
    }

    /// The current default connection name.
    pub fn default_connection_name(&self) -> &str {
        &self.default_name
    }

    /// Change the default connection name.
    ///
    /// Already-cached connections are unaffected; only subsequent default
    /// resolutions see the new name.
    pub fn set_default_connection_name(&mut self, name: impl Into<String>) {
        self.default_name = name.into();
    }

    /// Snapshot of the built connections, for introspection and tests.
    pub async fn connections(&self) -> HashMap<String, Arc<dyn SearchEngineClient>> {
        self.cache.lock().await.clone()
    }

    // Forwarding methods: the manager can stand in for a single client when
    // only the default connection is needed. Each resolves the default
    // connection and delegates one call.

    /// Check whether an index exists on the default connection.
    pub async fn index_exists(&self, index: &str) -> Result<bool, ManagerError> {
        Ok(self.connection(None).await?.index_exists(index).await?)
    }

    /// Create an index on the default connection.
    pub async fn create_index(
        &self,
        index: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), ManagerError> {
        Ok(self.connection(None).await?.create_index(index, body).await?)
    }

    /// Update the mappings of an index on the default connection.
    pub async fn put_mapping(
        &self,
        index: &str,
        body: &serde_json::Value,
    ) -> Result<(), ManagerError> {
        Ok(self.connection(None).await?.put_mapping(index, body).await?)
    }

    /// Delete an index on the default connection.
    pub async fn delete_index(&self, index: &str) -> Result<(), ManagerError> {
        Ok(self.connection(None).await?.delete_index(index).await?)
    }

    /// Point an alias at an index on the default connection.
    pub async fn put_alias(&self, index: &str, alias: &str) -> Result<(), ManagerError> {
        Ok(self.connection(None).await?.put_alias(index, alias).await?)
    }

    /// Remove an index from an alias on the default connection.
    pub async fn delete_alias(&self, index: &str, alias: &str) -> Result<(), ManagerError> {
        Ok(self.connection(None).await?.delete_alias(index, alias).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientOptions, HostConfig};
    use crate::errors::ClientError;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubClient {
        exists: bool,
    }

    #[async_trait]
    impl SearchEngineClient for StubClient {
        async fn index_exists(&self, _index: &str) -> Result<bool, ClientError> {
            Ok(self.exists)
        }

        async fn create_index(&self, _index: &str, _body: Option<&Value>) -> Result<(), ClientError> {
            Ok(())
        }

        async fn put_mapping(&self, _index: &str, _body: &Value) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete_index(&self, _index: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn put_alias(&self, _index: &str, _alias: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete_alias(&self, _index: &str, _alias: &str) -> Result<(), ClientError> {
            Ok(())
        }
    }

    struct CountingFactory {
        builds: AtomicUsize,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                builds: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ConnectionFactory for CountingFactory {
        async fn make(
            &self,
            _config: &ConnectionConfig,
        ) -> Result<Arc<dyn SearchEngineClient>, ConnectionError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(StubClient { exists: true }))
        }
    }

    fn test_config() -> ConnectionConfig {
        ConnectionConfig {
            hosts: vec![HostConfig::new("http", "localhost", 9200)],
            logging: None,
            options: ClientOptions::default(),
        }
    }

    fn manager_with(names: &[&str], default: &str) -> ConnectionManager {
        let configs = names
            .iter()
            .map(|name| (name.to_string(), test_config()))
            .collect();
        ConnectionManager::new(configs, default, Box::new(CountingFactory::new()))
    }

    #[tokio::test]
    async fn test_connection_memoized() {
        let factory = Box::new(CountingFactory::new());
        let configs = HashMap::from([("search".to_string(), test_config())]);
        let manager = ConnectionManager::new(configs, "search", factory);

        let first = manager.connection(Some("search")).await.unwrap();
        let second = manager.connection(Some("search")).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.connections().await.len(), 1);
    }

    #[tokio::test]
    async fn test_build_happens_once_per_name() {
        let factory = CountingFactory::new();
        let configs = HashMap::from([
            ("primary".to_string(), test_config()),
            ("replica".to_string(), test_config()),
        ]);
        let manager = ConnectionManager::new(configs, "primary", Box::new(factory));

        manager.connection(None).await.unwrap();
        manager.connection(Some("primary")).await.unwrap();
        manager.connection(Some("replica")).await.unwrap();
        manager.connection(Some("replica")).await.unwrap();

        let cache = manager.connections().await;
        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key("primary"));
        assert!(cache.contains_key("replica"));
    }

    #[tokio::test]
    async fn test_empty_name_resolves_default() {
        let manager = manager_with(&["primary"], "primary");

        let by_default = manager.connection(None).await.unwrap();
        let by_empty = manager.connection(Some("")).await.unwrap();

        assert!(Arc::ptr_eq(&by_default, &by_empty));
    }

    #[tokio::test]
    async fn test_unconfigured_name_fails_without_fallback() {
        let manager = manager_with(&["primary"], "primary");

        let result = manager.connection(Some("missing")).await;

        match result {
            Err(ConnectionError::NotConfigured(name)) => assert_eq!(name, "missing"),
            other => panic!("expected NotConfigured, got {:?}", other.map(|_| ())),
        }
        assert!(manager.connections().await.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_default_fails() {
        let manager = manager_with(&["primary"], "nonexistent");

        assert!(matches!(
            manager.connection(None).await,
            Err(ConnectionError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_set_default_connection_name() {
        let mut manager = manager_with(&["primary", "replica"], "primary");
        assert_eq!(manager.default_connection_name(), "primary");

        let before = manager.connection(None).await.unwrap();
        manager.set_default_connection_name("replica");
        assert_eq!(manager.default_connection_name(), "replica");

        let after = manager.connection(None).await.unwrap();
        assert!(!Arc::ptr_eq(&before, &after));

        // The previously cached connection survives the default switch.
        let cache = manager.connections().await;
        assert!(cache.contains_key("primary"));
        assert!(cache.contains_key("replica"));
    }

    #[tokio::test]
    async fn test_forwarding_uses_default_connection() {
        let manager = manager_with(&["primary"], "primary");

        assert!(manager.index_exists("products").await.unwrap());
        assert!(manager.put_alias("products", "live").await.is_ok());
        assert_eq!(manager.connections().await.len(), 1);
    }

    #[tokio::test]
    async fn test_forwarding_surfaces_connection_errors() {
        let manager = manager_with(&["primary"], "missing");

        assert!(matches!(
            manager.index_exists("products").await,
            Err(ManagerError::Connection(ConnectionError::NotConfigured(_)))
        ));
    }
}
