//! Error types for the search admin client.

mod client_error;
mod connection_error;
mod op_error;

pub use client_error::ClientError;
pub use connection_error::{ConnectionError, ManagerError};
pub use op_error::OpError;
