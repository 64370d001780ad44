//! Harness Simulation Tests
//!
//! Drives the adapter the way a load-generating benchmark does: a load
//! phase that inserts every record, then a run phase where worker threads
//! issue a random read/update mix, each worker with its own adapter
//! instance over one shared connection manager.

use docbench::{
    AdapterConfig, ConnectionManager, Db, DocumentAdapter, InMemoryDriver, Record, Status,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

const TABLE: &str = "usertable";
const RECORD_COUNT: usize = 200;
const FIELD_COUNT: usize = 10;
const WORKERS: usize = 8;
const OPERATIONS_PER_WORKER: usize = 500;

fn key(i: usize) -> String {
    format!("user{}", i)
}

fn build_record(rng: &mut StdRng) -> Record {
    (0..FIELD_COUNT)
        .map(|f| {
            let value: String = (0..16)
                .map(|_| rng.gen_range(b'a'..=b'z') as char)
                .collect();
            (format!("field{}", f), value.into_bytes())
        })
        .collect()
}

fn load(manager: &Arc<ConnectionManager>) {
    let mut adapter = DocumentAdapter::new(Arc::clone(manager), AdapterConfig::default());
    adapter.init().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for i in 0..RECORD_COUNT {
        assert_eq!(adapter.insert(TABLE, &key(i), &build_record(&mut rng)), Status::Ok);
    }
    adapter.cleanup().unwrap();
}

#[test]
fn test_load_then_run_phase() {
    let driver = InMemoryDriver::new();
    let manager = Arc::new(ConnectionManager::new(Arc::new(driver.clone())));

    load(&manager);
    assert_eq!(driver.document_count("default"), RECORD_COUNT);

    let start = Arc::new(Barrier::new(WORKERS));
    let workers: Vec<_> = (0..WORKERS)
        .map(|w| {
            let manager = Arc::clone(&manager);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                let mut adapter = DocumentAdapter::new(manager, AdapterConfig::default());
                adapter.init().unwrap();
                start.wait();

                let mut rng = StdRng::seed_from_u64(w as u64);
                let mut statuses: HashMap<&'static str, usize> = HashMap::new();
                for _ in 0..OPERATIONS_PER_WORKER {
                    let k = key(rng.gen_range(0..RECORD_COUNT));
                    let status = if rng.gen_bool(0.5) {
                        let mut result = Record::new();
                        let status = adapter.read(TABLE, &k, None, &mut result);
                        if status.is_ok() {
                            // Full record, or the single field of a prior update_field
                            assert!(result.len() == FIELD_COUNT || result.len() == 1);
                        }
                        status
                    } else {
                        let field = format!("field{}", rng.gen_range(0..FIELD_COUNT));
                        adapter.update_field(TABLE, &k, &field, b"updated")
                    };
                    *statuses.entry(status.name()).or_default() += 1;
                }

                adapter.cleanup().unwrap();
                statuses
            })
        })
        .collect();

    let mut totals: HashMap<&'static str, usize> = HashMap::new();
    for worker in workers {
        for (name, count) in worker.join().unwrap() {
            *totals.entry(name).or_default() += count;
        }
    }

    assert_eq!(totals.values().sum::<usize>(), WORKERS * OPERATIONS_PER_WORKER);
    assert_eq!(totals.get("ERROR"), None);
    assert_eq!(totals.get("NOT_FOUND"), None);

    assert_eq!(manager.active_references(), 0);
    let stats = driver.stats();
    assert_eq!(stats.open_sessions, 0);
    assert_eq!(stats.environments_created, stats.environments_shut_down);
}

#[test]
fn test_run_phase_against_unloaded_keys() {
    let manager = Arc::new(ConnectionManager::new(Arc::new(InMemoryDriver::new())));
    let mut adapter = DocumentAdapter::new(manager, AdapterConfig::default());
    adapter.init().unwrap();

    let mut result = Record::new();
    assert_eq!(
        adapter.read(TABLE, &key(RECORD_COUNT + 1), None, &mut result),
        Status::NotFound
    );
    assert_eq!(
        adapter.update_field(TABLE, &key(RECORD_COUNT + 1), "field0", b"x"),
        Status::NotFound
    );
    adapter.cleanup().unwrap();
}
