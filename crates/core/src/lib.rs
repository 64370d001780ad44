//! Core types for docbench
//!
//! This crate defines the foundational types shared by every layer:
//! - Record: field-name to byte-value mapping exchanged with the harness
//! - DocumentId: store-side identity composed from table and key
//! - Document: JSON object content addressed by a DocumentId
//! - Codec: record <-> document conversion with field projection
//! - Error: error type hierarchy and the ErrorKind tag

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod codec;
pub mod error;
pub mod key;
pub mod types;

// Re-export commonly used types and functions
pub use codec::{decode, encode};
pub use error::{Error, ErrorKind, Result};
pub use key::{compose_id, validate_key, validate_table, IdError, ID_SEPARATOR};
pub use types::{Document, DocumentContent, DocumentId, Record};
