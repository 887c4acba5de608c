//! Errors raised while resolving or building named connections.

use thiserror::Error;

use super::ClientError;

/// Errors that can occur when a connection is resolved or built.
///
/// These represent misconfiguration and propagate uncaught to the process
/// boundary; they are never converted into an operation failure message.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The requested connection name has no configuration entry.
    #[error("Connection [{0}] is not configured.")]
    NotConfigured(String),

    /// The configuration entry is present but unusable.
    #[error("Invalid connection configuration: {0}")]
    InvalidConfig(String),

    /// The transport could not be constructed.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ConnectionError {
    /// Create a not-configured error for the given connection name.
    pub fn not_configured(name: impl Into<String>) -> Self {
        Self::NotConfigured(name.into())
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Errors returned by the manager's forwarding methods, which may fail while
/// resolving the default connection or while executing the remote call.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
