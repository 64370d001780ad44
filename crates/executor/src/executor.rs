//! The Executor - single entry point to the bucket.
//!
//! The Executor routes operations to their handlers and logs every failure
//! with the offending key. It holds the bucket handle and the durability
//! requirement resolved at initialization, and no other state.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, warn};

use docbench_core::Record;
use docbench_durability::DurabilityRequirement;
use docbench_engine::Bucket;

use crate::handlers::{document, scan};
use crate::types::Operation;
use crate::{Command, Error, Output, Result};

/// The command executor.
///
/// Each call is a single blocking round trip with no retry. The bucket is
/// used without client-side locking.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use docbench_executor::{Command, Executor};
///
/// let executor = Executor::new(handle.bucket(), config.durability());
///
/// // Single command execution
/// executor.execute(Command::Insert {
///     table: "usertable".into(),
///     key: "user1".into(),
///     values,
/// })?;
///
/// // Batch execution
/// let results = executor.execute_many(vec![
///     Command::Read { table: "usertable".into(), key: "user1".into(), fields: None },
///     Command::Delete { table: "usertable".into(), key: "user1".into() },
/// ]);
/// ```
pub struct Executor {
    bucket: Arc<dyn Bucket>,
    durability: DurabilityRequirement,
}

impl Executor {
    /// Create a new executor over an opened bucket.
    pub fn new(bucket: Arc<dyn Bucket>, durability: DurabilityRequirement) -> Self {
        Self { bucket, durability }
    }

    /// Durability requirement applied to every write.
    pub fn durability(&self) -> DurabilityRequirement {
        self.durability
    }

    /// Get a reference to the underlying bucket.
    pub fn bucket(&self) -> &Arc<dyn Bucket> {
        &self.bucket
    }

    /// Read a document, all fields or exactly `fields`.
    pub fn read(&self, table: &str, key: &str, fields: Option<&HashSet<String>>) -> Result<Record> {
        let result = document::read(self.bucket.as_ref(), table, key, fields);
        log_failure(Operation::Read, key, result)
    }

    /// Insert a new document.
    pub fn insert(&self, table: &str, key: &str, values: &Record) -> Result<()> {
        let result = document::insert(self.bucket.as_ref(), self.durability, table, key, values);
        log_failure(Operation::Insert, key, result)
    }

    /// Replace an existing document.
    pub fn update(&self, table: &str, key: &str, values: &Record) -> Result<()> {
        let result = document::update(self.bucket.as_ref(), self.durability, table, key, values);
        log_failure(Operation::Update, key, result)
    }

    /// Replace an existing document with a single field.
    pub fn update_field(&self, table: &str, key: &str, field: &str, value: &[u8]) -> Result<()> {
        let result = document::update_field(
            self.bucket.as_ref(),
            self.durability,
            table,
            key,
            field,
            value,
        );
        log_failure(Operation::Update, key, result)
    }

    /// Remove a document.
    pub fn delete(&self, table: &str, key: &str) -> Result<()> {
        let result = document::delete(self.bucket.as_ref(), self.durability, table, key);
        log_failure(Operation::Delete, key, result)
    }

    /// Range scan. Always fails with [`Error::NotImplemented`].
    pub fn scan(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&HashSet<String>>,
    ) -> Result<Vec<Record>> {
        let result = scan::scan(table, start_key, record_count, fields);
        log_failure(Operation::Scan, start_key, result)
    }

    /// Single-field range scan. Always fails with [`Error::NotImplemented`].
    pub fn scan_field(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        field: &str,
    ) -> Result<Vec<Record>> {
        let result = scan::scan_field(table, start_key, record_count, field);
        log_failure(Operation::Scan, start_key, result)
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::Read { table, key, fields } => {
                self.read(&table, &key, fields.as_ref()).map(Output::Record)
            }
            Command::Insert { table, key, values } => {
                self.insert(&table, &key, &values).map(|()| Output::Unit)
            }
            Command::Update { table, key, values } => {
                self.update(&table, &key, &values).map(|()| Output::Unit)
            }
            Command::UpdateField {
                table,
                key,
                field,
                value,
            } => self
                .update_field(&table, &key, &field, &value)
                .map(|()| Output::Unit),
            Command::Delete { table, key } => self.delete(&table, &key).map(|()| Output::Unit),
            Command::Scan {
                table,
                start_key,
                record_count,
                fields,
            } => self
                .scan(&table, &start_key, record_count, fields.as_ref())
                .map(|_| Output::Unit),
            Command::ScanField {
                table,
                start_key,
                record_count,
                field,
            } => self
                .scan_field(&table, &start_key, record_count, &field)
                .map(|_| Output::Unit),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Every command is executed; one failure does not stop the batch.
    /// Results are returned in command order.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }
}

fn log_failure<T>(operation: Operation, key: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        match (operation, e) {
            (Operation::Read, Error::KeyNotFound { .. }) => warn!(
                target: "docbench::executor",
                key = %key,
                "Key not found, please check loaded data"
            ),
            (_, Error::NotImplemented { .. }) => warn!(
                target: "docbench::executor",
                operation = %operation,
                start_key = %key,
                "Operation not supported by the document store"
            ),
            _ => error!(
                target: "docbench::executor",
                key = %key,
                kind = %e.kind(),
                error = %e,
                "Error {} key",
                operation.verb()
            ),
        }
    }
    result
}
