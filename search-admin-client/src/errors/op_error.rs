//! Failure outcomes of administrative operations.

use thiserror::Error;

/// A failed administrative operation.
///
/// The `Display` implementation is the exact single-line message reported to
/// the user. Remote failures embed the underlying client error text verbatim
/// and never propagate further than the operation boundary.
#[derive(Debug, Clone, Error)]
pub enum OpError {
    /// A string argument was empty.
    #[error("Argument {0} must be a non empty string.")]
    InvalidArgument(String),

    /// The mapping file path argument was empty or does not exist.
    #[error("Argument mapping-file-path must exists on filesystem and must be a non empty string.")]
    InvalidMappingPath,

    /// The target's existence state contradicts the operation's requirement.
    #[error("{0}")]
    Precondition(String),

    /// The remote call failed; the message embeds the client error text.
    #[error("{0}")]
    Remote(String),
}

impl OpError {
    /// Create an invalid-argument error for the named argument.
    pub fn invalid_argument(name: impl Into<String>) -> Self {
        Self::InvalidArgument(name.into())
    }

    /// Create a precondition error with a pre-formatted message.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a remote error with a pre-formatted message.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }
}
