//! Output enum for command execution results.
//!
//! Every command produces exactly one output type: `Read` produces
//! `Record`, every write produces `Unit`.

use serde::{Deserialize, Serialize};

use docbench_core::Record;

/// Successful command execution results.
///
/// # Example
///
/// ```text
/// use docbench_executor::{Command, Output};
///
/// match executor.execute(Command::Read { table, key, fields: None })? {
///     Output::Record(record) => println!("{} fields", record.len()),
///     Output::Unit => unreachable!("Read always returns Record"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (insert, update, delete)
    Unit,

    /// Fields of a read document
    Record(Record),
}

impl Output {
    /// The record of a read, `None` for writes
    pub fn into_record(self) -> Option<Record> {
        match self {
            Output::Record(record) => Some(record),
            Output::Unit => None,
        }
    }
}
