//! Connection factory.
//!
//! Translates a [`ConnectionConfig`] into a live, fully configured client.
//! The factory is behind a trait so the connection manager can be tested
//! with a mock that counts builds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use opensearch::auth::Credentials;
use opensearch::cert::CertificateValidation;
use opensearch::http::headers::{HeaderMap, HeaderName, HeaderValue};
use opensearch::http::transport::{
    Connection, ConnectionPool, SingleNodeConnectionPool, TransportBuilder,
};
use opensearch::OpenSearch;
use tracing::info;
use url::Url;

use crate::config::{ConnectionConfig, HostConfig, PoolStrategy};
use crate::errors::ConnectionError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::OpenSearchAdminClient;

/// Builds a client from a connection configuration.
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Build a client for the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(client)` - A configured client ready to issue requests
    /// * `Err(ConnectionError)` - If the configuration is invalid or the
    ///   transport cannot be constructed
    async fn make(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Arc<dyn SearchEngineClient>, ConnectionError>;
}

/// Factory producing [`OpenSearchAdminClient`] instances.
#[derive(Debug, Default)]
pub struct OpenSearchFactory;

impl OpenSearchFactory {
    pub fn new() -> Self {
        Self
    }
}

/// Round-robin pool over the configured hosts.
///
/// The client library only ships a single-node pool, so multi-host
/// configurations rotate through this implementation of the transport's
/// `ConnectionPool` trait.
#[derive(Debug, Clone)]
struct RoundRobinConnectionPool {
    connections: Vec<Connection>,
    index: Arc<AtomicUsize>,
}

impl RoundRobinConnectionPool {
    /// Build a pool over the given URLs. Must be non-empty.
    fn new(urls: Vec<Url>) -> Self {
        Self {
            connections: urls.into_iter().map(Connection::new).collect(),
            index: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl ConnectionPool for RoundRobinConnectionPool {
    fn next(&self) -> &Connection {
        let index = self.index.fetch_add(1, Ordering::Relaxed);
        &self.connections[index % self.connections.len()]
    }
}

/// Normalize a host descriptor into a connection URL.
///
/// Only scheme, host, and port participate; credential fields are handled
/// separately by [`credentials`].
fn host_url(host: &HostConfig) -> Result<Url, ConnectionError> {
    let raw = format!("{}://{}:{}", host.scheme, host.host, host.port);
    Url::parse(&raw).map_err(|e| ConnectionError::invalid_config(format!("host {}: {}", raw, e)))
}

/// Select the credentials for a connection.
///
/// The transport keeps a single credential set, so the hosts are scanned
/// explicitly: the last host carrying a complete API key pair wins, and
/// otherwise the last host carrying a complete basic pair. API keys take
/// precedence over basic authentication when both are configured.
fn credentials(hosts: &[HostConfig]) -> Option<Credentials> {
    if let Some((id, key)) = hosts.iter().rev().find_map(HostConfig::api_key_credentials) {
        return Some(Credentials::ApiKey(id.to_string(), key.to_string()));
    }

    hosts
        .iter()
        .rev()
        .find_map(HostConfig::basic_credentials)
        .map(|(user, pass)| Credentials::Basic(user.to_string(), pass.to_string()))
}

#[async_trait]
impl ConnectionFactory for OpenSearchFactory {
    async fn make(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Arc<dyn SearchEngineClient>, ConnectionError> {
        if config.hosts.is_empty() {
            return Err(ConnectionError::invalid_config(
                "at least one host is required",
            ));
        }

        let urls = config
            .hosts
            .iter()
            .map(host_url)
            .collect::<Result<Vec<_>, _>>()?;
        let host_count = urls.len();

        // Pool strategy defaults to single-node for one host.
        let mut builder = match (config.options.pool, host_count) {
            (Some(PoolStrategy::SingleNode), _) | (None, 1) => {
                TransportBuilder::new(SingleNodeConnectionPool::new(urls[0].clone()))
            }
            _ => TransportBuilder::new(RoundRobinConnectionPool::new(urls)),
        };

        // Options are applied in the declaration order of ClientOptions.
        if let Some(verify) = config.options.verify_certs {
            let validation = if verify {
                CertificateValidation::Default
            } else {
                CertificateValidation::None
            };
            builder = builder.cert_validation(validation);
        }

        if let Some(secs) = config.options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if config.options.disable_proxy {
            builder = builder.disable_proxy();
        } else if let Some(proxy) = &config.options.proxy {
            let proxy_url = Url::parse(proxy)
                .map_err(|e| ConnectionError::invalid_config(format!("proxy {}: {}", proxy, e)))?;
            builder = builder.proxy(proxy_url, None, None);
        }

        if !config.options.headers.is_empty() {
            let mut headers = HeaderMap::new();
            for (name, value) in &config.options.headers {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    ConnectionError::invalid_config(format!("header {}: {}", name, e))
                })?;
                let value = HeaderValue::from_str(value).map_err(|e| {
                    ConnectionError::invalid_config(format!("header value: {}", e))
                })?;
                headers.insert(name, value);
            }
            builder = builder.headers(headers);
        }

        if let Some(credentials) = credentials(&config.hosts) {
            builder = builder.auth(credentials);
        }

        let transport = builder
            .build()
            .map_err(|e| ConnectionError::transport(e.to_string()))?;

        info!(hosts = host_count, "Created OpenSearch client");

        Ok(Arc::new(OpenSearchAdminClient::new(OpenSearch::new(
            transport,
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientOptions;

    fn host(scheme: &str, name: &str, port: u16) -> HostConfig {
        HostConfig::new(scheme, name, port)
    }

    #[test]
    fn test_host_url() {
        let url = host_url(&host("https", "node-1.internal", 9200)).unwrap();
        assert_eq!(url.as_str(), "https://node-1.internal:9200/");
    }

    #[test]
    fn test_host_url_ignores_credentials() {
        let mut with_auth = host("http", "localhost", 9200);
        with_auth.user = Some("admin".to_string());
        with_auth.pass = Some("secret".to_string());

        let url = host_url(&with_auth).unwrap();
        assert_eq!(url.username(), "");
        assert!(url.password().is_none());
    }

    #[test]
    fn test_host_url_invalid_scheme() {
        assert!(host_url(&host("not a scheme", "localhost", 9200)).is_err());
    }

    #[test]
    fn test_credentials_last_basic_wins() {
        let mut first = host("http", "node-1", 9200);
        first.user = Some("first".to_string());
        first.pass = Some("pass1".to_string());
        let mut last = host("http", "node-2", 9200);
        last.user = Some("last".to_string());
        last.pass = Some("pass2".to_string());

        let selected = credentials(&[first, last]);
        assert!(
            matches!(selected, Some(Credentials::Basic(user, _)) if user == "last"),
            "expected the last host's basic credentials"
        );
    }

    #[test]
    fn test_credentials_api_key_precedence() {
        let mut basic = host("http", "node-1", 9200);
        basic.user = Some("admin".to_string());
        basic.pass = Some("secret".to_string());
        let mut keyed = host("http", "node-2", 9200);
        keyed.api_id = Some("id".to_string());
        keyed.api_key = Some("key".to_string());

        // API key wins regardless of host order.
        let selected = credentials(&[keyed, basic]);
        assert!(matches!(selected, Some(Credentials::ApiKey(id, _)) if id == "id"));
    }

    #[test]
    fn test_credentials_none_configured() {
        assert!(credentials(&[host("http", "node-1", 9200)]).is_none());
    }

    #[tokio::test]
    async fn test_make_rejects_empty_hosts() {
        let factory = OpenSearchFactory::new();
        let config = ConnectionConfig {
            hosts: vec![],
            logging: None,
            options: ClientOptions::default(),
        };

        let result = factory.make(&config).await;
        assert!(matches!(result, Err(ConnectionError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_make_builds_client_without_network() {
        let factory = OpenSearchFactory::new();
        let config = ConnectionConfig {
            hosts: vec![host("http", "localhost", 9200)],
            logging: None,
            options: ClientOptions {
                timeout_secs: Some(5),
                headers: vec![("x-team".to_string(), "platform".to_string())],
                ..ClientOptions::default()
            },
        };

        // Transport construction is local; no server is contacted.
        assert!(factory.make(&config).await.is_ok());
    }

    #[test]
    fn test_round_robin_pool_rotates_hosts() {
        let pool = RoundRobinConnectionPool::new(vec![
            Url::parse("http://node-1:9200").unwrap(),
            Url::parse("http://node-2:9200").unwrap(),
        ]);

        let first = pool.next() as *const Connection;
        let second = pool.next() as *const Connection;
        let third = pool.next() as *const Connection;

        assert_ne!(first, second);
        // After one full cycle the pool hands out the first host again.
        assert_eq!(first, third);
    }

    #[tokio::test]
    async fn test_make_multi_node_round_robin() {
        let factory = OpenSearchFactory::new();
        let config = ConnectionConfig {
            hosts: vec![host("http", "node-1", 9200), host("http", "node-2", 9200)],
            logging: None,
            options: ClientOptions {
                pool: Some(PoolStrategy::RoundRobin),
                ..ClientOptions::default()
            },
        };

        assert!(factory.make(&config).await.is_ok());
    }
}
