//! Scan command handlers.
//!
//! The store is addressed by document id only; there is no ordered key
//! space to range over. Both handlers fail immediately without touching the
//! bucket.

use std::collections::HashSet;

use docbench_core::Record;

use crate::types::Operation;
use crate::{Error, Result};

fn not_implemented() -> Error {
    Error::NotImplemented {
        operation: Operation::Scan.as_str().to_string(),
    }
}

/// Handle Scan command.
pub fn scan(
    _table: &str,
    _start_key: &str,
    _record_count: usize,
    _fields: Option<&HashSet<String>>,
) -> Result<Vec<Record>> {
    Err(not_implemented())
}

/// Handle ScanField command.
pub fn scan_field(
    _table: &str,
    _start_key: &str,
    _record_count: usize,
    _field: &str,
) -> Result<Vec<Record>> {
    Err(not_implemented())
}
