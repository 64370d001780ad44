//! In-memory store driver
//!
//! A process-local implementation of the store capability. It keeps bucket
//! contents in hash maps that outlive environments, so data written through
//! one environment is visible after it is shut down and another is created,
//! the same way a real cluster outlives its clients.
//!
//! # Use Cases
//!
//! - Unit and integration tests for the adapter
//! - Benchmarking the adapter's own overhead
//! - Dry runs of a workload without a cluster
//!
//! # Simulated cluster
//!
//! | Setting | Default | Effect |
//! |---------|---------|--------|
//! | nodes | 1 | Durability requirements needing more nodes fail with `DurabilityTimeout` |
//! | hosts | `localhost` | Connecting to any other host fails with `Connection` |
//! | buckets | `default` (empty password) | Unknown bucket or wrong password fails with `Connection` |
//!
//! Durability is checked before the mutation is applied, so a write that
//! fails its requirement leaves the bucket unchanged.

use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use docbench_core::{Document, DocumentContent, DocumentId, Error, Result};
use docbench_durability::DurabilityRequirement;

use crate::store::{Bucket, Cluster, Driver, Environment};

type BucketData = RwLock<HashMap<DocumentId, DocumentContent>>;

#[derive(Debug, Clone)]
struct ServerConfig {
    nodes: usize,
    hosts: Vec<String>,
    credentials: HashMap<String, String>,
}

#[derive(Default)]
struct ServerState {
    buckets: RwLock<HashMap<String, Arc<BucketData>>>,
    environments_created: AtomicUsize,
    environments_shut_down: AtomicUsize,
    open_sessions: AtomicUsize,
}

impl ServerState {
    fn bucket_data(&self, name: &str) -> Arc<BucketData> {
        if let Some(data) = self.buckets.read().get(name) {
            return Arc::clone(data);
        }
        let mut buckets = self.buckets.write();
        Arc::clone(buckets.entry(name.to_string()).or_default())
    }
}

/// Lifecycle counters of an [`InMemoryDriver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverStats {
    /// Environments created so far
    pub environments_created: usize,
    /// Environments shut down so far
    pub environments_shut_down: usize,
    /// Cluster sessions currently connected
    pub open_sessions: usize,
}

/// In-process store driver
///
/// Clones share the same simulated cluster.
///
/// # Example
///
/// ```
/// use docbench_engine::InMemoryDriver;
///
/// let driver = InMemoryDriver::new()
///     .with_nodes(3)
///     .with_bucket("ycsb", "secret");
/// assert_eq!(driver.stats().environments_created, 0);
/// ```
#[derive(Clone)]
pub struct InMemoryDriver {
    config: Arc<ServerConfig>,
    state: Arc<ServerState>,
}

impl Default for InMemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDriver {
    /// Single-node cluster on `localhost` with the `default` bucket
    pub fn new() -> Self {
        let mut credentials = HashMap::new();
        credentials.insert("default".to_string(), String::new());
        Self {
            config: Arc::new(ServerConfig {
                nodes: 1,
                hosts: vec!["localhost".to_string()],
                credentials,
            }),
            state: Arc::new(ServerState::default()),
        }
    }

    /// Set the number of simulated nodes (at least one)
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        Arc::make_mut(&mut self.config).nodes = nodes.max(1);
        self
    }

    /// Make another hostname reachable
    pub fn with_host(mut self, hostname: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).hosts.push(hostname.into());
        self
    }

    /// Add a bucket, or change an existing bucket's password
    pub fn with_bucket(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .credentials
            .insert(name.into(), password.into());
        self
    }

    /// Snapshot of the lifecycle counters
    pub fn stats(&self) -> DriverStats {
        DriverStats {
            environments_created: self.state.environments_created.load(Ordering::SeqCst),
            environments_shut_down: self.state.environments_shut_down.load(Ordering::SeqCst),
            open_sessions: self.state.open_sessions.load(Ordering::SeqCst),
        }
    }

    /// Number of documents stored in `bucket`
    pub fn document_count(&self, bucket: &str) -> usize {
        self.state
            .buckets
            .read()
            .get(bucket)
            .map(|data| data.read().len())
            .unwrap_or(0)
    }
}

impl Driver for InMemoryDriver {
    fn create_environment(&self) -> Result<Arc<dyn Environment>> {
        self.state.environments_created.fetch_add(1, Ordering::SeqCst);
        debug!(target: "docbench::memory", nodes = self.config.nodes, "Environment created");
        Ok(Arc::new(InMemoryEnvironment {
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            shut_down: AtomicBool::new(false),
        }))
    }
}

struct InMemoryEnvironment {
    config: Arc<ServerConfig>,
    state: Arc<ServerState>,
    shut_down: AtomicBool,
}

impl Environment for InMemoryEnvironment {
    fn connect(&self, hostname: &str) -> Result<Box<dyn Cluster>> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(Error::connection("environment is shut down"));
        }
        if !self.config.hosts.iter().any(|h| h == hostname) {
            return Err(Error::connection(format!(
                "cannot reach host '{}'",
                hostname
            )));
        }

        self.state.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryCluster {
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            connected: Arc::new(AtomicBool::new(true)),
        }))
    }

    fn shutdown(&self) -> Result<()> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Err(Error::store("environment already shut down"));
        }
        self.state
            .environments_shut_down
            .fetch_add(1, Ordering::SeqCst);
        debug!(target: "docbench::memory", "Environment shut down");
        Ok(())
    }
}

struct InMemoryCluster {
    config: Arc<ServerConfig>,
    state: Arc<ServerState>,
    connected: Arc<AtomicBool>,
}

impl Cluster for InMemoryCluster {
    fn open_bucket(&self, name: &str, password: &str) -> Result<Arc<dyn Bucket>> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(Error::connection("cluster session is disconnected"));
        }
        match self.config.credentials.get(name) {
            None => Err(Error::connection(format!(
                "bucket '{}' does not exist",
                name
            ))),
            Some(expected) if expected != password => Err(Error::connection(format!(
                "authentication failed for bucket '{}'",
                name
            ))),
            Some(_) => Ok(Arc::new(InMemoryBucket {
                name: name.to_string(),
                nodes: self.config.nodes,
                data: self.state.bucket_data(name),
                connected: Arc::clone(&self.connected),
            })),
        }
    }

    fn disconnect(&self) -> Result<()> {
        if self.connected.swap(false, Ordering::SeqCst) {
            self.state.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

struct InMemoryBucket {
    name: String,
    nodes: usize,
    data: Arc<BucketData>,
    connected: Arc<AtomicBool>,
}

impl InMemoryBucket {
    fn check_connected(&self) -> Result<()> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::store(format!(
                "bucket '{}' belongs to a disconnected session",
                self.name
            )))
        }
    }

    fn check_durability(&self, id: &DocumentId, durability: DurabilityRequirement) -> Result<()> {
        let required = durability.nodes_required();
        if required > self.nodes {
            return Err(Error::DurabilityTimeout {
                id: id.clone(),
                reason: format!(
                    "{} needs {} nodes, cluster has {}",
                    durability, required, self.nodes
                ),
            });
        }
        Ok(())
    }
}

impl Bucket for InMemoryBucket {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, id: &DocumentId) -> Result<Option<Document>> {
        self.check_connected()?;
        let data = self.data.read();
        Ok(data
            .get(id)
            .map(|content| Document::new(id.clone(), content.clone())))
    }

    fn insert(&self, document: Document, durability: DurabilityRequirement) -> Result<()> {
        self.check_connected()?;
        let (id, content) = document.into_parts();
        let mut data = self.data.write();
        match data.entry(id) {
            Entry::Occupied(entry) => Err(Error::DocumentExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                self.check_durability(entry.key(), durability)?;
                entry.insert(content);
                Ok(())
            }
        }
    }

    fn replace(&self, document: Document, durability: DurabilityRequirement) -> Result<()> {
        self.check_connected()?;
        let (id, content) = document.into_parts();
        let mut data = self.data.write();
        match data.get_mut(&id) {
            Some(slot) => {
                self.check_durability(&id, durability)?;
                *slot = content;
                Ok(())
            }
            None => Err(Error::DocumentNotFound(id)),
        }
    }

    fn remove(&self, id: &DocumentId, durability: DurabilityRequirement) -> Result<()> {
        self.check_connected()?;
        let mut data = self.data.write();
        if !data.contains_key(id) {
            return Err(Error::DocumentNotFound(id.clone()));
        }
        self.check_durability(id, durability)?;
        data.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbench_core::compose_id;
    use docbench_durability::resolve;
    use serde_json::json;

    fn open_default(driver: &InMemoryDriver) -> (Arc<dyn Environment>, Box<dyn Cluster>, Arc<dyn Bucket>) {
        let env = driver.create_environment().unwrap();
        let cluster = env.connect("localhost").unwrap();
        let bucket = cluster.open_bucket("default", "").unwrap();
        (env, cluster, bucket)
    }

    fn doc(key: &str, name: &str) -> Document {
        let mut content = DocumentContent::new();
        content.insert("name".to_string(), json!(name));
        Document::new(compose_id("usertable", key).unwrap(), content)
    }

    #[test]
    fn test_insert_then_get() {
        let driver = InMemoryDriver::new();
        let (_env, _cluster, bucket) = open_default(&driver);

        bucket.insert(doc("u1", "ann"), DurabilityRequirement::NONE).unwrap();
        let found = bucket.get(&compose_id("usertable", "u1").unwrap()).unwrap().unwrap();
        assert_eq!(found.content()["name"], json!("ann"));
        assert_eq!(driver.document_count("default"), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let driver = InMemoryDriver::new();
        let (_env, _cluster, bucket) = open_default(&driver);
        let id = compose_id("usertable", "nobody").unwrap();
        assert!(bucket.get(&id).unwrap().is_none());
    }

    #[test]
    fn test_insert_existing_fails() {
        let driver = InMemoryDriver::new();
        let (_env, _cluster, bucket) = open_default(&driver);

        bucket.insert(doc("u1", "ann"), DurabilityRequirement::NONE).unwrap();
        let err = bucket.insert(doc("u1", "bea"), DurabilityRequirement::NONE).unwrap_err();
        assert!(matches!(err, Error::DocumentExists(_)));

        // First write wins
        let found = bucket.get(&compose_id("usertable", "u1").unwrap()).unwrap().unwrap();
        assert_eq!(found.content()["name"], json!("ann"));
    }

    #[test]
    fn test_replace_requires_existing() {
        let driver = InMemoryDriver::new();
        let (_env, _cluster, bucket) = open_default(&driver);

        let err = bucket.replace(doc("u1", "ann"), DurabilityRequirement::NONE).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
        assert_eq!(driver.document_count("default"), 0);

        bucket.insert(doc("u1", "ann"), DurabilityRequirement::NONE).unwrap();
        bucket.replace(doc("u1", "bea"), DurabilityRequirement::NONE).unwrap();
        let found = bucket.get(&compose_id("usertable", "u1").unwrap()).unwrap().unwrap();
        assert_eq!(found.content()["name"], json!("bea"));
    }

    #[test]
    fn test_remove_requires_existing() {
        let driver = InMemoryDriver::new();
        let (_env, _cluster, bucket) = open_default(&driver);
        let id = compose_id("usertable", "u1").unwrap();

        assert!(matches!(
            bucket.remove(&id, DurabilityRequirement::NONE),
            Err(Error::DocumentNotFound(_))
        ));

        bucket.insert(doc("u1", "ann"), DurabilityRequirement::NONE).unwrap();
        bucket.remove(&id, DurabilityRequirement::NONE).unwrap();
        assert!(bucket.get(&id).unwrap().is_none());
    }

    #[test]
    fn test_durability_beyond_cluster_size_times_out() {
        let driver = InMemoryDriver::new();
        let (_env, _cluster, bucket) = open_default(&driver);

        let err = bucket.insert(doc("u1", "ann"), resolve("master", "1")).unwrap_err();
        assert!(matches!(err, Error::DurabilityTimeout { .. }));
        assert_eq!(driver.document_count("default"), 0);
    }

    #[test]
    fn test_durability_within_cluster_size() {
        let driver = InMemoryDriver::new().with_nodes(4);
        let (_env, _cluster, bucket) = open_default(&driver);

        bucket.insert(doc("u1", "ann"), resolve("4", "3")).unwrap();
        bucket.replace(doc("u1", "bea"), resolve("2", "1")).unwrap();
        bucket
            .remove(&compose_id("usertable", "u1").unwrap(), resolve("master", "0"))
            .unwrap();
    }

    #[test]
    fn test_unknown_host_rejected() {
        let driver = InMemoryDriver::new();
        let env = driver.create_environment().unwrap();
        let err = env.connect("db.example.com").err().unwrap();
        assert!(matches!(err, Error::Connection(_)));

        let driver = InMemoryDriver::new().with_host("db.example.com");
        let env = driver.create_environment().unwrap();
        assert!(env.connect("db.example.com").is_ok());
    }

    #[test]
    fn test_bucket_credentials() {
        let driver = InMemoryDriver::new().with_bucket("ycsb", "secret");
        let env = driver.create_environment().unwrap();
        let cluster = env.connect("localhost").unwrap();

        assert!(matches!(
            cluster.open_bucket("missing", "").err().unwrap(),
            Error::Connection(_)
        ));
        assert!(matches!(
            cluster.open_bucket("ycsb", "wrong").err().unwrap(),
            Error::Connection(_)
        ));
        let bucket = cluster.open_bucket("ycsb", "secret").unwrap();
        assert_eq!(bucket.name(), "ycsb");
    }

    #[test]
    fn test_data_outlives_environment() {
        let driver = InMemoryDriver::new();
        {
            let (env, cluster, bucket) = open_default(&driver);
            bucket.insert(doc("u1", "ann"), DurabilityRequirement::NONE).unwrap();
            cluster.disconnect().unwrap();
            env.shutdown().unwrap();
        }
        let (_env, _cluster, bucket) = open_default(&driver);
        assert!(bucket
            .get(&compose_id("usertable", "u1").unwrap())
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_disconnected_session_rejects_operations() {
        let driver = InMemoryDriver::new();
        let (_env, cluster, bucket) = open_default(&driver);
        cluster.disconnect().unwrap();

        let err = bucket.get(&compose_id("usertable", "u1").unwrap()).unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert!(cluster.open_bucket("default", "").is_err());
    }

    #[test]
    fn test_lifecycle_counters() {
        let driver = InMemoryDriver::new();
        let env = driver.create_environment().unwrap();
        let c1 = env.connect("localhost").unwrap();
        let c2 = env.connect("localhost").unwrap();
        assert_eq!(driver.stats().open_sessions, 2);

        c1.disconnect().unwrap();
        c1.disconnect().unwrap();
        assert_eq!(driver.stats().open_sessions, 1);
        c2.disconnect().unwrap();

        env.shutdown().unwrap();
        assert!(env.shutdown().is_err());
        assert!(env.connect("localhost").is_err());

        assert_eq!(
            driver.stats(),
            DriverStats {
                environments_created: 1,
                environments_shut_down: 1,
                open_sessions: 0,
            }
        );
    }
}
