//! Command enum defining all adapter operations.
//!
//! Commands are the serializable form of the harness operations. They let a
//! driver program replay a recorded workload, or batch operations through
//! [`Executor::execute_many`](crate::Executor::execute_many).
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use docbench_core::Record;

use crate::types::Operation;

/// A command is a self-contained, serializable operation.
///
/// # Commands
///
/// | Command | Returns | Store call |
/// |---------|---------|------------|
/// | `Read` | `Output::Record` | get |
/// | `Insert` | `Output::Unit` | insert |
/// | `Update`, `UpdateField` | `Output::Unit` | replace |
/// | `Delete` | `Output::Unit` | remove |
/// | `Scan`, `ScanField` | always `Error::NotImplemented` | none |
///
/// # Example
///
/// ```ignore
/// use docbench_executor::Command;
///
/// let cmd = Command::Read {
///     table: "usertable".into(),
///     key: "user1".into(),
///     fields: None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Read a document, optionally projected to `fields`.
    /// Returns: `Output::Record`
    Read {
        table: String,
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<HashSet<String>>,
    },

    /// Insert a new document.
    /// Returns: `Output::Unit`
    Insert {
        table: String,
        key: String,
        values: Record,
    },

    /// Replace an existing document with `values`.
    /// Returns: `Output::Unit`
    Update {
        table: String,
        key: String,
        values: Record,
    },

    /// Replace an existing document with a single field.
    /// Returns: `Output::Unit`
    UpdateField {
        table: String,
        key: String,
        field: String,
        value: Vec<u8>,
    },

    /// Remove a document.
    /// Returns: `Output::Unit`
    Delete { table: String, key: String },

    /// Range scan. Not supported.
    Scan {
        table: String,
        start_key: String,
        record_count: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<HashSet<String>>,
    },

    /// Single-field range scan. Not supported.
    ScanField {
        table: String,
        start_key: String,
        record_count: usize,
        field: String,
    },
}

impl Command {
    /// Operation this command performs
    pub fn operation(&self) -> Operation {
        match self {
            Command::Read { .. } => Operation::Read,
            Command::Insert { .. } => Operation::Insert,
            Command::Update { .. } | Command::UpdateField { .. } => Operation::Update,
            Command::Delete { .. } => Operation::Delete,
            Command::Scan { .. } | Command::ScanField { .. } => Operation::Scan,
        }
    }

    /// Variant name
    pub fn name(&self) -> &'static str {
        match self {
            Command::Read { .. } => "Read",
            Command::Insert { .. } => "Insert",
            Command::Update { .. } => "Update",
            Command::UpdateField { .. } => "UpdateField",
            Command::Delete { .. } => "Delete",
            Command::Scan { .. } => "Scan",
            Command::ScanField { .. } => "ScanField",
        }
    }

    /// Record key (start key for scans)
    pub fn key(&self) -> &str {
        match self {
            Command::Read { key, .. }
            | Command::Insert { key, .. }
            | Command::Update { key, .. }
            | Command::UpdateField { key, .. }
            | Command::Delete { key, .. } => key,
            Command::Scan { start_key, .. } | Command::ScanField { start_key, .. } => start_key,
        }
    }
}
