//! Dependency initialization and wiring for the admin CLI.

use search_admin_client::{ConnectionManager, OpenSearchFactory};

use crate::config::AppSettings;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The connection registry, ready to resolve named connections.
    pub manager: ConnectionManager,
}

impl Dependencies {
    /// Wire the connection manager from the loaded settings.
    ///
    /// Connections are built lazily; nothing is contacted here.
    pub fn new(settings: AppSettings) -> Self {
        let manager = ConnectionManager::new(
            settings.connections,
            settings.default_connection,
            Box::new(OpenSearchFactory::new()),
        );

        Self { manager }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_admin_client::ConnectionError;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_wiring_uses_configured_default() {
        let settings = AppSettings {
            default_connection: "primary".to_string(),
            connections: HashMap::new(),
        };

        let deps = Dependencies::new(settings);

        assert_eq!(deps.manager.default_connection_name(), "primary");
        // No connection is built until one is requested.
        assert!(deps.manager.connections().await.is_empty());
        assert!(matches!(
            deps.manager.connection(None).await,
            Err(ConnectionError::NotConfigured(_))
        ));
    }
}
