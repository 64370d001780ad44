//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Classified**: Every variant maps to one [`ErrorKind`], the tag carried
//!   by a failed [`Status`](crate::Status)

use docbench_core::ErrorKind;
use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Not Found | `KeyNotFound` | Document doesn't exist |
/// | Conflict | `KeyExists` | Insert of an existing document |
/// | Data | `FieldNotFound`, `Encoding` | Document shape doesn't fit the request |
/// | Validation | `InvalidKey` | Table/key cannot form a document id |
/// | Durability | `DurabilityTimeout` | Write not confirmed at the required level |
/// | Capability | `NotImplemented` | Scan family |
/// | Lifecycle | `Connection`, `Config`, `AlreadyReleased`, `NotConnected` | Adapter setup and teardown |
/// | System | `Store` | Any other driver fault |
///
/// # Example
///
/// ```ignore
/// use docbench_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::KeyNotFound { key }) => {
///         println!("Key '{}' not found", key);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Document does not exist
    #[error("key not found: {key}")]
    KeyNotFound {
        /// Document id that was looked up
        key: String,
    },

    // ==================== Conflict ====================
    /// Document already exists
    #[error("key already exists: {key}")]
    KeyExists {
        /// Document id that already exists
        key: String,
    },

    // ==================== Data Errors ====================
    /// Requested field absent from the stored document
    #[error("field not found: {field}")]
    FieldNotFound {
        /// Requested field name
        field: String,
    },

    /// Value cannot be represented in the document format
    #[error("encoding error: {reason}")]
    Encoding {
        /// Why the value was rejected
        reason: String,
    },

    // ==================== Validation Errors ====================
    /// Table or key cannot form a document id
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Which part of the id is invalid
        reason: String,
    },

    // ==================== Durability Errors ====================
    /// Durability requirement not confirmed
    #[error("durability timeout: {reason}")]
    DurabilityTimeout {
        /// Store-provided description
        reason: String,
    },

    // ==================== Capability Errors ====================
    /// Operation not supported by this adapter
    #[error("not implemented: {operation}")]
    NotImplemented {
        /// Operation name
        operation: String,
    },

    // ==================== Lifecycle Errors ====================
    /// Cluster connect or bucket open failed
    #[error("connection error: {reason}")]
    Connection {
        /// Driver-provided description
        reason: String,
    },

    /// Configuration unreadable or malformed
    #[error("configuration error: {reason}")]
    Config {
        /// Parse or I/O failure description
        reason: String,
    },

    /// Cleanup of an adapter that was already cleaned up
    #[error("connection already released")]
    AlreadyReleased,

    /// Operation on an adapter that was never initialized
    #[error("adapter not connected")]
    NotConnected,

    // ==================== System Errors ====================
    /// Any other store fault
    #[error("store error: {reason}")]
    Store {
        /// Driver-provided description
        reason: String,
    },
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyNotFound { .. } => ErrorKind::NotFound,
            Error::KeyExists { .. } => ErrorKind::AlreadyExists,
            Error::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            Error::Encoding { .. } => ErrorKind::Encoding,
            Error::InvalidKey { .. } => ErrorKind::InvalidId,
            Error::DurabilityTimeout { .. } => ErrorKind::DurabilityTimeout,
            Error::NotImplemented { .. } => ErrorKind::NotImplemented,
            Error::Connection { .. } | Error::NotConnected => ErrorKind::Connection,
            Error::Config { .. } => ErrorKind::Config,
            Error::AlreadyReleased => ErrorKind::AlreadyReleased,
            Error::Store { .. } => ErrorKind::Store,
        }
    }
}
