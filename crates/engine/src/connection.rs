//! Shared environment lifecycle
//!
//! Every adapter instance targeting the same deployment holds a clone of one
//! `Arc<ConnectionManager>`. The first [`ConnectionManager::acquire`] builds
//! the client environment; each acquisition then gets its own cluster session
//! and bucket handle. The environment is shut down when the last handle is
//! released.
//!
//! Only the create/destroy transitions take the manager lock. Connecting a
//! session and opening its bucket happen outside it, so a slow connect does
//! not block other instances from releasing.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use docbench_core::{Error, Result};

use crate::config::AdapterConfig;
use crate::store::{Bucket, Cluster, Driver, Environment};

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

struct SharedEnvironment {
    environment: Arc<dyn Environment>,
    references: usize,
}

/// Reference-counted owner of the shared client environment
pub struct ConnectionManager {
    id: u64,
    driver: Arc<dyn Driver>,
    shared: Mutex<Option<SharedEnvironment>>,
}

impl ConnectionManager {
    /// Create a manager that builds its environment through `driver`
    ///
    /// No environment exists until the first acquisition.
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            driver,
            shared: Mutex::new(None),
        }
    }

    /// Connect a new session to the configured host and bucket
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the environment cannot be created,
    /// the host cannot be reached or the bucket cannot be opened. The
    /// reference count is left as it was before the call.
    pub fn acquire(&self, config: &AdapterConfig) -> Result<ConnectionHandle> {
        let environment = self.retain_environment()?;

        match Self::open_session(environment.as_ref(), config) {
            Ok((cluster, bucket)) => {
                debug!(
                    target: "docbench::connection",
                    hostname = %config.hostname,
                    bucket = %config.bucket,
                    "Session connected"
                );
                Ok(ConnectionHandle {
                    session: Arc::new(Session {
                        manager_id: self.id,
                        cluster,
                        bucket,
                        hostname: config.hostname.clone(),
                        released: AtomicBool::new(false),
                    }),
                })
            }
            Err(e) => {
                if let Err(release_err) = self.release_environment() {
                    warn!(
                        target: "docbench::connection",
                        error = %release_err,
                        "Failed to give back environment after connect failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// Disconnect a handle's session and drop its environment reference
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the handle was issued by another
    /// manager; nothing is released in that case. Returns
    /// [`Error::AlreadyReleased`] if this handle (or a clone of it) was
    /// released before. Otherwise the disconnect or shutdown fault, if any;
    /// the reference is dropped either way.
    pub fn release(&self, handle: &ConnectionHandle) -> Result<()> {
        if handle.session.manager_id != self.id {
            return Err(Error::Connection(
                "handle was issued by another connection manager".to_string(),
            ));
        }
        if handle.session.released.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyReleased);
        }

        let disconnected = handle.session.cluster.disconnect();
        match &disconnected {
            Ok(()) => debug!(
                target: "docbench::connection",
                hostname = %handle.session.hostname,
                "Session disconnected"
            ),
            Err(e) => warn!(
                target: "docbench::connection",
                hostname = %handle.session.hostname,
                error = %e,
                "Session disconnect failed"
            ),
        }

        self.release_environment()?;
        disconnected
    }

    /// Number of handles currently holding the environment
    pub fn active_references(&self) -> usize {
        self.shared
            .lock()
            .as_ref()
            .map(|shared| shared.references)
            .unwrap_or(0)
    }

    fn retain_environment(&self) -> Result<Arc<dyn Environment>> {
        let mut shared = self.shared.lock();
        if let Some(existing) = shared.as_mut() {
            existing.references += 1;
            return Ok(Arc::clone(&existing.environment));
        }

        let environment = self.driver.create_environment().map_err(as_connection)?;
        info!(target: "docbench::connection", "Shared environment created");
        *shared = Some(SharedEnvironment {
            environment: Arc::clone(&environment),
            references: 1,
        });
        Ok(environment)
    }

    fn release_environment(&self) -> Result<()> {
        let mut shared = self.shared.lock();
        let remaining = match shared.as_mut() {
            Some(existing) => {
                existing.references -= 1;
                existing.references
            }
            None => return Err(Error::AlreadyReleased),
        };
        if remaining > 0 {
            return Ok(());
        }

        if let Some(last) = shared.take() {
            last.environment.shutdown()?;
            info!(target: "docbench::connection", "Shared environment shut down");
        }
        Ok(())
    }

    fn open_session(
        environment: &dyn Environment,
        config: &AdapterConfig,
    ) -> Result<(Box<dyn Cluster>, Arc<dyn Bucket>)> {
        let cluster = environment
            .connect(&config.hostname)
            .map_err(as_connection)?;
        match cluster.open_bucket(&config.bucket, &config.password) {
            Ok(bucket) => Ok((cluster, bucket)),
            Err(e) => {
                let _ = cluster.disconnect();
                Err(as_connection(e))
            }
        }
    }
}

fn as_connection(e: Error) -> Error {
    match e {
        Error::Connection(_) => e,
        other => Error::Connection(other.to_string()),
    }
}

struct Session {
    manager_id: u64,
    cluster: Box<dyn Cluster>,
    bucket: Arc<dyn Bucket>,
    hostname: String,
    released: AtomicBool,
}

/// One adapter instance's session and bucket
///
/// Clones refer to the same session and share its release flag.
#[derive(Clone)]
pub struct ConnectionHandle {
    session: Arc<Session>,
}

impl ConnectionHandle {
    /// The opened bucket
    pub fn bucket(&self) -> Arc<dyn Bucket> {
        Arc::clone(&self.session.bucket)
    }

    /// Host the session is connected to
    pub fn hostname(&self) -> &str {
        &self.session.hostname
    }

    /// True once the handle was released
    pub fn is_released(&self) -> bool {
        self.session.released.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("hostname", &self.session.hostname)
            .field("bucket", &self.session.bucket.name())
            .field("released", &self.is_released())
            .finish()
    }
}
