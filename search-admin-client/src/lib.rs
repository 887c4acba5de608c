//! # Search Admin Client
//!
//! This crate provides a named connection registry for OpenSearch clients and
//! the administrative index/alias operations built on top of it. It includes
//! definitions for errors, the abstract client interface, and a concrete
//! implementation for OpenSearch.

pub mod admin;
pub mod config;
pub mod errors;
pub mod factory;
pub mod interfaces;
pub mod manager;
pub mod opensearch;

pub use admin::IndexAdmin;
pub use config::{ClientOptions, ConnectionConfig, HostConfig, LoggingConfig, PoolStrategy};
pub use errors::{ClientError, ConnectionError, ManagerError, OpError};
pub use factory::{ConnectionFactory, OpenSearchFactory};
pub use interfaces::SearchEngineClient;
pub use manager::ConnectionManager;
pub use self::opensearch::OpenSearchAdminClient;
