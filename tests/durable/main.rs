//! RocksDB backend: persistence across reopen and on-disk layout.
#![cfg(feature = "rocksdb")]

use std::sync::Arc;

use srs_sourced::{
    config, Event, EventLog, EventStore, ExpectedVersion, Projected, ReviewProjection,
    ReviewScoring, RocksDbEventStore, Score, StoreConfig, StreamId,
};

fn named(name: &str) -> Event {
    Event::ModelNamed { name: name.into() }
}

#[test]
fn commits_survive_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let a = StreamId::new();
    let b = StreamId::new();

    let before = {
        let log = EventLog::new(RocksDbEventStore::open(dir.path()).unwrap());
        log.record(a, named("a0"), ExpectedVersion::NoStream).unwrap();
        log.record(b, named("b0"), ExpectedVersion::NoStream).unwrap();
        log.record(a, named("a1"), ExpectedVersion::Exact(0)).unwrap();
        let commits = log.store().commits().unwrap();
        log.close().unwrap();
        commits
    };

    let log = EventLog::new(RocksDbEventStore::open(dir.path()).unwrap());
    assert_eq!(log.store().commits().unwrap(), before);
    assert_eq!(log.count().unwrap(), 3);
    assert_eq!(log.stream_version(a).unwrap(), Some(1));
    assert_eq!(log.stream_version(b).unwrap(), Some(0));

    // Version checks pick up where they left off.
    assert!(log
        .record(a, named("stale"), ExpectedVersion::Exact(0))
        .unwrap_err()
        .is_conflict());
    assert_eq!(
        log.record(a, named("a2"), ExpectedVersion::Exact(1)).unwrap(),
        2
    );
    assert_eq!(
        log.events_for_stream(a)
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn commits_carry_global_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let store = RocksDbEventStore::open(dir.path()).unwrap();
    let a = StreamId::new();
    let b = StreamId::new();
    store.append(a, named("a0"), ExpectedVersion::NoStream).unwrap();
    store.append(b, named("b0"), ExpectedVersion::NoStream).unwrap();

    let sequences: Vec<u64> = store
        .commits()
        .unwrap()
        .iter()
        .map(|commit| commit.sequence)
        .collect();
    assert_eq!(sequences, vec![0, 1]);
    assert_eq!(store.stream_commits(b).unwrap()[0].sequence, 1);
}

#[test]
fn schedule_and_projection_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let card = StreamId::new();

    {
        let log = Arc::new(EventLog::new(RocksDbEventStore::open(dir.path()).unwrap()));
        let scoring = ReviewScoring::new(log.clone());
        scoring.score_card(card, Score::Good).unwrap();
        scoring.score_card(card, Score::Good).unwrap();
    }

    let log = Arc::new(EventLog::new(RocksDbEventStore::open(dir.path()).unwrap()));
    let reviews = Projected::<ReviewProjection>::start(&log).unwrap();
    let view = reviews.card_for(card).unwrap();
    assert_eq!(view.review_count, 2);
    assert_eq!(view.due_date, 3);

    let scoring = ReviewScoring::new(log);
    let next = scoring.score_card(card, Score::Good).unwrap();
    assert_eq!((next.next_due_date, next.interval), (7, 4));
    assert_eq!(reviews.card_for(card).unwrap().due_date, 7);
}

#[test]
fn config_opens_rocksdb_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::rocksdb(dir.path().join("events")).with_sync_writes(true);

    let log = config::open(&config).unwrap();
    log.record(StreamId::new(), named("x"), ExpectedVersion::NoStream)
        .unwrap();
    log.close().unwrap();

    let log = config::open(&config).unwrap();
    assert_eq!(log.count().unwrap(), 1);
}

#[test]
fn config_without_create_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StoreConfig::rocksdb(dir.path().join("absent"));
    config.create_if_missing = false;
    assert!(config::open(&config).is_err());
}
