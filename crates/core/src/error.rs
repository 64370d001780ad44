//! Error types for docbench
//!
//! This module defines the error type used below the executor: by the codec,
//! the connection manager and every store driver. We use `thiserror` for
//! automatic `Display` and `Error` trait implementations.
//!
//! Each variant belongs to exactly one [`ErrorKind`]. The kind is the tag the
//! executor attaches to a failed status, so the harness can tell a missing
//! document from a durability timeout without parsing messages.

use crate::key::IdError;
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for docbench operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for docbench
#[derive(Debug, Error)]
pub enum Error {
    /// Connecting to the cluster or opening the bucket failed
    ///
    /// Fatal during adapter initialization; never retried internally.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Adapter configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store did not confirm the durability requirement in time
    #[error("Durability requirement not met for {id}: {reason}")]
    DurabilityTimeout {
        /// Document the write was addressed to
        id: DocumentId,
        /// Store-provided description
        reason: String,
    },

    /// Document does not exist (read, replace, remove)
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Document already exists (insert)
    #[error("Document already exists: {0}")]
    DocumentExists(DocumentId),

    /// A value cannot be represented as the store's scalar type
    #[error("Encoding error for field '{field}': {reason}")]
    Encoding {
        /// Offending field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A requested field is absent from the stored document
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Operation outside the adapter's capabilities
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Table or key cannot form a document id
    #[error("Invalid document id: {0}")]
    InvalidId(#[from] IdError),

    /// Connection handle was released twice
    #[error("Connection handle already released")]
    AlreadyReleased,

    /// Any other driver fault
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Error::Connection(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Error::Store(message.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Connection(_) => ErrorKind::Connection,
            Error::Config(_) => ErrorKind::Config,
            Error::DurabilityTimeout { .. } => ErrorKind::DurabilityTimeout,
            Error::DocumentNotFound(_) => ErrorKind::NotFound,
            Error::DocumentExists(_) => ErrorKind::AlreadyExists,
            Error::Encoding { .. } => ErrorKind::Encoding,
            Error::FieldNotFound(_) => ErrorKind::FieldNotFound,
            Error::NotImplemented(_) => ErrorKind::NotImplemented,
            Error::InvalidId(_) => ErrorKind::InvalidId,
            Error::AlreadyReleased => ErrorKind::AlreadyReleased,
            Error::Store(_) => ErrorKind::Store,
        }
    }
}

/// Error classification attached to failed operation statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Cluster connect or bucket open failed
    Connection,
    /// Configuration unreadable or malformed
    Config,
    /// Durability requirement not confirmed
    DurabilityTimeout,
    /// Document missing
    NotFound,
    /// Document already present on insert
    AlreadyExists,
    /// Value not representable in the document format
    Encoding,
    /// Projected field missing from the document
    FieldNotFound,
    /// Unsupported operation (scan family)
    NotImplemented,
    /// Table or key rejected by the id scheme
    InvalidId,
    /// Connection handle released twice
    AlreadyReleased,
    /// Unclassified driver fault
    Store,
}

impl ErrorKind {
    /// Stable snake_case name for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Config => "config",
            ErrorKind::DurabilityTimeout => "durability_timeout",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::Encoding => "encoding",
            ErrorKind::FieldNotFound => "field_not_found",
            ErrorKind::NotImplemented => "not_implemented",
            ErrorKind::InvalidId => "invalid_id",
            ErrorKind::AlreadyReleased => "already_released",
            ErrorKind::Store => "store",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
