//! Multi-Threaded Connection Manager Tests
//!
//! Many adapter instances acquiring and releasing one shared environment
//! from parallel worker threads.

use docbench_core::Error;
use docbench_engine::{AdapterConfig, ConnectionManager, InMemoryDriver};
use std::sync::{Arc, Barrier};
use std::thread;

const WORKERS: usize = 16;

fn shared_manager() -> (InMemoryDriver, Arc<ConnectionManager>) {
    let driver = InMemoryDriver::new();
    let manager = Arc::new(ConnectionManager::new(Arc::new(driver.clone())));
    (driver, manager)
}

// ============================================================================
// Shared Environment Lifecycle
// ============================================================================

/// Test: N parallel acquisitions then N parallel releases tear down once
#[test]
fn test_parallel_acquire_release_shuts_down_once() {
    let (driver, manager) = shared_manager();
    let config = AdapterConfig::default();
    let acquired = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let config = config.clone();
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                let handle = manager.acquire(&config).unwrap();
                // Everyone holds a reference before anyone releases
                acquired.wait();
                manager.release(&handle).unwrap();
                handle
            })
        })
        .collect();

    let released: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let stats = driver.stats();
    assert_eq!(stats.environments_created, 1);
    assert_eq!(stats.environments_shut_down, 1);
    assert_eq!(stats.open_sessions, 0);
    assert_eq!(manager.active_references(), 0);

    // (N+1)-th release
    assert!(matches!(
        manager.release(&released[0]),
        Err(Error::AlreadyReleased)
    ));
    assert_eq!(driver.stats().environments_shut_down, 1);
}

/// Test: all instances initialized concurrently see one environment
#[test]
fn test_parallel_acquire_creates_single_environment() {
    let (driver, manager) = shared_manager();
    let start = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                manager.acquire(&AdapterConfig::default()).unwrap()
            })
        })
        .collect();

    let connections: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(manager.active_references(), WORKERS);
    assert_eq!(driver.stats().environments_created, 1);
    assert_eq!(driver.stats().open_sessions, WORKERS);

    for connection in &connections {
        manager.release(connection).unwrap();
    }
    assert_eq!(driver.stats().environments_shut_down, 1);
}

/// Test: concurrent releases of clones of one handle succeed exactly once
#[test]
fn test_racing_double_release_succeeds_once() {
    let (driver, manager) = shared_manager();
    let keeper = manager.acquire(&AdapterConfig::default()).unwrap();
    let contested = manager.acquire(&AdapterConfig::default()).unwrap();
    let start = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let handle = contested.clone();
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                manager.release(&handle).is_ok()
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(manager.active_references(), 1);
    assert_eq!(driver.stats().environments_shut_down, 0);

    manager.release(&keeper).unwrap();
    assert_eq!(driver.stats().environments_shut_down, 1);
}

// ============================================================================
// Initialization Failures
// ============================================================================

/// Test: failing instances do not disturb healthy ones
#[test]
fn test_failed_acquisitions_interleaved_with_good_ones() {
    let (driver, manager) = shared_manager();
    let start = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let manager = Arc::clone(&manager);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                let config = if i % 2 == 0 {
                    AdapterConfig::default()
                } else {
                    AdapterConfig {
                        bucket: format!("missing-{}", i),
                        ..AdapterConfig::default()
                    }
                };
                start.wait();
                manager.acquire(&config)
            })
        })
        .collect();

    let mut held = Vec::new();
    let mut failures = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(connection) => held.push(connection),
            Err(e) => {
                assert!(matches!(e, Error::Connection(_)));
                failures += 1;
            }
        }
    }

    assert_eq!(held.len(), WORKERS / 2);
    assert_eq!(failures, WORKERS / 2);
    assert_eq!(manager.active_references(), WORKERS / 2);
    assert_eq!(driver.stats().open_sessions, WORKERS / 2);

    for connection in &held {
        manager.release(connection).unwrap();
    }
    assert_eq!(manager.active_references(), 0);
    assert_eq!(
        driver.stats().environments_created,
        driver.stats().environments_shut_down
    );
}
