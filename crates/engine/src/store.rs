//! Store capability
//!
//! The adapter never speaks the store's wire protocol. It drives these traits,
//! which a client driver implements:
//!
//! ```text
//! Driver ──create_environment──▶ Environment (shared, one per manager)
//!                                   │
//!                                   └─connect(hostname)──▶ Cluster (one per adapter instance)
//!                                                            │
//!                                                            └─open_bucket(name, password)──▶ Bucket
//! ```
//!
//! # Write contract
//!
//! | Operation | Document present | Document absent |
//! |-----------|------------------|-----------------|
//! | `insert` | `DocumentExists` | stored |
//! | `replace` | stored | `DocumentNotFound` |
//! | `remove` | removed | `DocumentNotFound` |
//!
//! Writes block until the store confirms the [`DurabilityRequirement`] or
//! fail with `DurabilityTimeout`.

use std::sync::Arc;

use docbench_core::{Document, DocumentId, Result};
use docbench_durability::DurabilityRequirement;

/// Entry point of a client driver
pub trait Driver: Send + Sync {
    /// Build a new client environment (I/O threads, pools, timers)
    fn create_environment(&self) -> Result<Arc<dyn Environment>>;
}

/// Shared client environment
///
/// Expensive to create; shared by every adapter instance of one
/// [`ConnectionManager`](crate::ConnectionManager).
pub trait Environment: Send + Sync {
    /// Connect a cluster session to `hostname`
    fn connect(&self, hostname: &str) -> Result<Box<dyn Cluster>>;

    /// Release the environment's resources
    ///
    /// Called exactly once, after every session using it was disconnected.
    fn shutdown(&self) -> Result<()>;
}

/// A cluster session owned by one adapter instance
pub trait Cluster: Send + Sync {
    /// Open a bucket with its credential
    fn open_bucket(&self, name: &str, password: &str) -> Result<Arc<dyn Bucket>>;

    /// Close the session
    fn disconnect(&self) -> Result<()>;
}

/// An opened bucket: the namespace documents are addressed in
///
/// Implementations must be safe to call from many threads at once; the
/// executor issues operations without any client-side locking.
pub trait Bucket: Send + Sync {
    /// Bucket name
    fn name(&self) -> &str;

    /// Fetch a document, `None` if absent
    fn get(&self, id: &DocumentId) -> Result<Option<Document>>;

    /// Store a new document
    fn insert(&self, document: Document, durability: DurabilityRequirement) -> Result<()>;

    /// Overwrite an existing document
    fn replace(&self, document: Document, durability: DurabilityRequirement) -> Result<()>;

    /// Remove an existing document
    fn remove(&self, id: &DocumentId, durability: DurabilityRequirement) -> Result<()>;
}
