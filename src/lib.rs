//! docbench - benchmark-harness adapter for document key-value stores
//!
//! docbench binds a generic load-generating benchmark to a document store:
//! the harness drives create/read/update/delete operations through the
//! [`Db`] trait and receives a [`Status`] for each one.
//!
//! # Quick Start
//!
//! ```ignore
//! use docbench::{ConnectionManager, Db, DocumentAdapter, InMemoryDriver};
//!
//! // One manager per deployment, shared by every worker thread
//! let manager = Arc::new(ConnectionManager::new(Arc::new(InMemoryDriver::new())));
//!
//! let mut adapter = DocumentAdapter::from_properties(Arc::clone(&manager), &properties);
//! adapter.init()?;
//! let status = adapter.insert("usertable", "user1", &values);
//! adapter.cleanup()?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which owns the bucket handle
//! and the durability requirement resolved at initialization. The
//! [`ConnectionManager`] shares one client environment between all adapter
//! instances and shuts it down when the last one is cleaned up.
//!
//! Internal implementation details (codec, durability parsing, driver
//! traits) live in their own crates; only the executor API is re-exported.

// Re-export the public API from docbench-executor
pub use docbench_executor::*;
