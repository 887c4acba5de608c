//! Transport-level errors raised by the search engine client.

use thiserror::Error;

/// Errors that can occur while talking to the search engine.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("Request error: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl ClientError {
    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create an unexpected-status error.
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }
}
