//! Connection layer for docbench
//!
//! This crate owns everything between an adapter instance and the store:
//! - `store`: the opaque store capability (driver, environment, cluster, bucket)
//! - `memory`: an in-process implementation of that capability
//! - `connection`: reference-counted environment sharing across adapter instances
//! - `config`: adapter configuration from harness properties or `docbench.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connection;
pub mod memory;
pub mod store;

pub use config::{AdapterConfig, CONFIG_FILE_NAME, PROPERTY_PREFIX};
pub use connection::{ConnectionHandle, ConnectionManager};
pub use memory::{DriverStats, InMemoryDriver};
pub use store::{Bucket, Cluster, Driver, Environment};
