//! Event log contract, run against every backend.


mod in_memory {
    event_log_contract!(((), srs_sourced::InMemoryEventStore::new()));
}

#[cfg(feature = "rocksdb")]
mod rocksdb {
    event_log_contract!({
        let dir = tempfile::tempdir().unwrap();
        let store = srs_sourced::RocksDbEventStore::open(dir.path()).unwrap();
        (dir, store)
    });
}
