//! Harness-facing adapter
//!
//! The benchmark harness creates one adapter per worker thread, calls
//! [`Db::init`] once, drives CRUD operations, then calls [`Db::cleanup`].
//! Operation failures never escape as errors: each operation returns a
//! [`Status`]. Only `init` and `cleanup` return `Result`, and a failed
//! `init` aborts the worker.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use docbench_core::Record;
use docbench_engine::{AdapterConfig, ConnectionHandle, ConnectionManager};

use crate::{Error, Executor, Result, Status};

/// The operations a benchmark harness drives
pub trait Db: Send {
    /// Connect; called once before any operation
    fn init(&mut self) -> Result<()>;

    /// Disconnect; called once after the last operation
    fn cleanup(&mut self) -> Result<()>;

    /// Read a record, all fields when `fields` is `None`
    ///
    /// On success the fields are added to `result`.
    fn read(
        &self,
        table: &str,
        key: &str,
        fields: Option<&HashSet<String>>,
        result: &mut Record,
    ) -> Status;

    /// Read `record_count` records starting at `start_key`
    fn scan(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&HashSet<String>>,
        result: &mut Vec<Record>,
    ) -> Status;

    /// Single-field scan
    fn scan_field(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        field: &str,
        result: &mut Vec<Record>,
    ) -> Status {
        let fields: HashSet<String> = std::iter::once(field.to_string()).collect();
        self.scan(table, start_key, record_count, Some(&fields), result)
    }

    /// Replace a record with `values`
    fn update(&self, table: &str, key: &str, values: &Record) -> Status;

    /// Replace a record with a single field
    fn update_field(&self, table: &str, key: &str, field: &str, value: &[u8]) -> Status {
        let mut values = Record::with_capacity(1);
        values.insert(field.to_string(), value.to_vec());
        self.update(table, key, &values)
    }

    /// Insert a new record
    fn insert(&self, table: &str, key: &str, values: &Record) -> Status;

    /// Delete a record
    fn delete(&self, table: &str, key: &str) -> Status;
}

struct Connected {
    handle: ConnectionHandle,
    executor: Executor,
}

/// Adapter instance for a document store
///
/// Instances that share one `Arc<ConnectionManager>` share its client
/// environment.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use docbench_executor::{ConnectionManager, Db, DocumentAdapter, InMemoryDriver, Status};
///
/// let manager = Arc::new(ConnectionManager::new(Arc::new(InMemoryDriver::new())));
/// let mut adapter = DocumentAdapter::from_properties(Arc::clone(&manager), &HashMap::new());
/// adapter.init().unwrap();
///
/// let mut values = HashMap::new();
/// values.insert("name".to_string(), b"ann".to_vec());
/// assert_eq!(adapter.insert("usertable", "user1", &values), Status::Ok);
///
/// adapter.cleanup().unwrap();
/// ```
pub struct DocumentAdapter {
    manager: Arc<ConnectionManager>,
    config: AdapterConfig,
    state: Option<Connected>,
}

impl DocumentAdapter {
    /// Create an unconnected adapter
    pub fn new(manager: Arc<ConnectionManager>, config: AdapterConfig) -> Self {
        Self {
            manager,
            config,
            state: None,
        }
    }

    /// Create an unconnected adapter from harness properties
    pub fn from_properties(
        manager: Arc<ConnectionManager>,
        properties: &HashMap<String, String>,
    ) -> Self {
        Self::new(manager, AdapterConfig::from_properties(properties))
    }

    /// Configuration this adapter connects with
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// True between a successful `init` and `cleanup`
    pub fn is_connected(&self) -> bool {
        self.state.is_some()
    }

    /// Executor of a connected adapter
    pub fn executor(&self) -> Result<&Executor> {
        self.state
            .as_ref()
            .map(|connected| &connected.executor)
            .ok_or(Error::NotConnected)
    }

    fn connected(&self) -> std::result::Result<&Executor, Status> {
        self.executor().map_err(|e| {
            warn!(target: "docbench::adapter", "Operation on an adapter that is not initialized");
            Status::from(&e)
        })
    }
}

impl Db for DocumentAdapter {
    fn init(&mut self) -> Result<()> {
        if self.state.is_some() {
            return Ok(());
        }

        let durability = self.config.durability();
        let handle = self.manager.acquire(&self.config)?;
        let executor = Executor::new(handle.bucket(), durability);

        info!(
            target: "docbench::adapter",
            hostname = %self.config.hostname,
            bucket = %self.config.bucket,
            durability = %durability,
            "Adapter initialized"
        );
        self.state = Some(Connected { handle, executor });
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        let connected = self.state.take().ok_or(Error::AlreadyReleased)?;
        self.manager.release(&connected.handle)?;
        info!(
            target: "docbench::adapter",
            hostname = %self.config.hostname,
            "Adapter cleaned up"
        );
        Ok(())
    }

    fn read(
        &self,
        table: &str,
        key: &str,
        fields: Option<&HashSet<String>>,
        result: &mut Record,
    ) -> Status {
        let executor = match self.connected() {
            Ok(executor) => executor,
            Err(status) => return status,
        };
        match executor.read(table, key, fields) {
            Ok(record) => {
                result.extend(record);
                Status::Ok
            }
            Err(e) => Status::from(&e),
        }
    }

    fn scan(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        fields: Option<&HashSet<String>>,
        result: &mut Vec<Record>,
    ) -> Status {
        let executor = match self.connected() {
            Ok(executor) => executor,
            Err(status) => return status,
        };
        match executor.scan(table, start_key, record_count, fields) {
            Ok(records) => {
                result.extend(records);
                Status::Ok
            }
            Err(e) => Status::from(&e),
        }
    }

    fn scan_field(
        &self,
        table: &str,
        start_key: &str,
        record_count: usize,
        field: &str,
        result: &mut Vec<Record>,
    ) -> Status {
        let executor = match self.connected() {
            Ok(executor) => executor,
            Err(status) => return status,
        };
        match executor.scan_field(table, start_key, record_count, field) {
            Ok(records) => {
                result.extend(records);
                Status::Ok
            }
            Err(e) => Status::from(&e),
        }
    }

    fn update(&self, table: &str, key: &str, values: &Record) -> Status {
        match self.connected() {
            Ok(executor) => Status::from(&executor.update(table, key, values)),
            Err(status) => status,
        }
    }

    fn update_field(&self, table: &str, key: &str, field: &str, value: &[u8]) -> Status {
        match self.connected() {
            Ok(executor) => Status::from(&executor.update_field(table, key, field, value)),
            Err(status) => status,
        }
    }

    fn insert(&self, table: &str, key: &str, values: &Record) -> Status {
        match self.connected() {
            Ok(executor) => Status::from(&executor.insert(table, key, values)),
            Err(status) => status,
        }
    }

    fn delete(&self, table: &str, key: &str) -> Status {
        match self.connected() {
            Ok(executor) => Status::from(&executor.delete(table, key)),
            Err(status) => status,
        }
    }
}

impl Drop for DocumentAdapter {
    fn drop(&mut self) {
        if let Some(connected) = self.state.take() {
            debug!(target: "docbench::adapter", "Adapter dropped without cleanup, releasing");
            if let Err(e) = self.manager.release(&connected.handle) {
                warn!(target: "docbench::adapter", error = %e, "Release on drop failed");
            }
        }
    }
}
