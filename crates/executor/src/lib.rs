//! # docbench Executor
//!
//! The public API of the docbench adapter: a benchmark-harness binding that
//! runs CRUD workloads against a document store.
//!
//! This is the only crate users need to import. It provides:
//! - [`Db`] - The operations a benchmark harness drives
//! - [`DocumentAdapter`] - The adapter instance implementing [`Db`]
//! - [`Status`] - Per-operation outcome reported to the harness
//! - [`Command`]/[`Output`] - Serializable command interface over [`Executor`]
//!
//! ## Quick Start
//!
//! ```text
//! use docbench_executor::{ConnectionManager, Db, DocumentAdapter, InMemoryDriver};
//!
//! // One manager per deployment, shared by every worker
//! let manager = Arc::new(ConnectionManager::new(Arc::new(InMemoryDriver::new())));
//!
//! // One adapter per worker
//! let mut adapter = DocumentAdapter::from_properties(Arc::clone(&manager), &properties);
//! adapter.init()?;
//!
//! let status = adapter.insert("usertable", "user1", &values);
//! let status = adapter.read("usertable", "user1", None, &mut result);
//!
//! adapter.cleanup()?;
//! ```
//!
//! ## Operations
//!
//! | Operation | Store call | Missing document | Existing document |
//! |-----------|------------|------------------|-------------------|
//! | read | get | `NotFound` | `Ok` |
//! | insert | insert | `Ok` | `Error(AlreadyExists)` |
//! | update / update_field | replace | `NotFound` | `Ok` |
//! | delete | remove | `NotFound` | `Ok` |
//! | scan / scan_field | none | `NotImplemented` | `NotImplemented` |

#![warn(missing_docs)]

mod adapter;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod status;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use adapter::{Db, DocumentAdapter};
pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use status::Status;
pub use types::*;

// Re-export data types so users don't need docbench-core directly
pub use docbench_core::{ErrorKind, Record};

// Re-export durability types so users don't need docbench-durability directly
pub use docbench_durability::{resolve, DurabilityRequirement, PersistenceLevel, ReplicationLevel};

// Re-export connection types so users don't need docbench-engine directly
pub use docbench_engine::{
    AdapterConfig, Bucket, Cluster, ConnectionHandle, ConnectionManager, Driver, DriverStats,
    Environment, InMemoryDriver,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
