//! Shared executor types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Harness operation names, used in logs and `NotImplemented` errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Read one document
    Read,
    /// Insert a new document
    Insert,
    /// Replace an existing document
    Update,
    /// Remove a document
    Delete,
    /// Range scan
    Scan,
}

impl Operation {
    /// Lowercase operation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Scan => "scan",
        }
    }

    /// Progressive form for failure logs ("Error reading key")
    pub(crate) fn verb(&self) -> &'static str {
        match self {
            Operation::Read => "reading",
            Operation::Insert => "inserting",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
            Operation::Scan => "scanning",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
