use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rocksdb::{Direction, IteratorMode, Options, WriteBatch, WriteOptions, DB};
use serde::{Deserialize, Serialize};

use super::keys::{
    decode_event_key, event_key, stream_version_key, EVENT_PREFIX, GLOBAL_VERSION_KEY,
};
use super::EventStore;
use crate::commit::{Commit, ExpectedVersion, Version};
use crate::error::{Result, StoreError};
use crate::event::Event;
use crate::stream_id::StreamId;

/// Value stored under each `event/<seq>` key.
#[derive(Serialize, Deserialize)]
struct StoredCommit {
    stream_id: StreamId,
    version: Version,
    event: Event,
}

#[derive(Debug, Clone, Copy)]
pub struct RocksDbOptions {
    pub create_if_missing: bool,
    /// fsync the WAL on every append.
    pub sync_writes: bool,
}

impl Default for RocksDbOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_writes: false,
        }
    }
}

/// Durable event store on RocksDB.
///
/// Every append writes the event, the stream's pointer and the global pointer
/// in a single `WriteBatch`, so a crash leaves either all three or none.
pub struct RocksDbEventStore {
    db: DB,
    path: PathBuf,
    sync_writes: bool,
    write_lock: Mutex<()>,
}

impl RocksDbEventStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, RocksDbOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: RocksDbOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut opts = Options::default();
        opts.create_if_missing(options.create_if_missing);
        let db = DB::open(&opts, &path).map_err(storage_err)?;
        tracing::info!(path = %path.display(), "opened rocksdb event store");

        Ok(Self {
            db,
            path,
            sync_writes: options.sync_writes,
            write_lock: Mutex::new(()),
        })
    }

    fn last_event_key(&self) -> Result<Option<Vec<u8>>> {
        self.db.get(GLOBAL_VERSION_KEY).map_err(storage_err)
    }

    fn load(&self, key: &[u8]) -> Result<Commit> {
        let blob = self
            .db
            .get(key)
            .map_err(storage_err)?
            .ok_or_else(|| {
                StoreError::Storage(format!(
                    "dangling event key {}",
                    String::from_utf8_lossy(key)
                ))
            })?;
        decode_commit(key, &blob)
    }

    fn each_commit(&self, mut f: impl FnMut(Commit)) -> Result<()> {
        let Some(last) = self.last_event_key()? else {
            return Ok(());
        };

        let iter = self
            .db
            .iterator(IteratorMode::From(EVENT_PREFIX.as_bytes(), Direction::Forward));
        for item in iter {
            let (key, blob) = item.map_err(storage_err)?;
            if !key.starts_with(EVENT_PREFIX.as_bytes()) || &*key > last.as_slice() {
                break;
            }
            f(decode_commit(&key, &blob)?);
        }
        Ok(())
    }
}

impl EventStore for RocksDbEventStore {
    fn append(
        &self,
        stream_id: StreamId,
        event: Event,
        expected: ExpectedVersion,
    ) -> Result<Commit> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned("rocksdb write"))?;

        let actual = self.stream_version(stream_id)?;
        if !expected.matches(actual) {
            return Err(StoreError::VersionConflict {
                stream_id,
                expected,
                actual,
            });
        }

        let sequence = self.count()?;
        let key = event_key(sequence);
        let stored = StoredCommit {
            stream_id,
            version: expected.next(),
            event,
        };
        let blob = bitcode::serialize(&stored).map_err(|e| StoreError::Codec(e.to_string()))?;

        let mut batch = WriteBatch::default();
        batch.put(key.as_bytes(), &blob);
        batch.put(stream_version_key(stream_id).as_bytes(), key.as_bytes());
        batch.put(GLOBAL_VERSION_KEY.as_bytes(), key.as_bytes());

        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.sync_writes);
        self.db.write_opt(batch, &write_opts).map_err(storage_err)?;

        Ok(Commit {
            sequence,
            stream_id: stored.stream_id,
            version: stored.version,
            event: stored.event,
        })
    }

    fn stream_version(&self, stream_id: StreamId) -> Result<Option<Version>> {
        let pointer = self
            .db
            .get(stream_version_key(stream_id))
            .map_err(storage_err)?;
        match pointer {
            Some(key) => Ok(Some(self.load(&key)?.version)),
            None => Ok(None),
        }
    }

    fn count(&self) -> Result<u64> {
        match self.last_event_key()? {
            Some(key) => Ok(decode_event_key(&key)? + 1),
            None => Ok(0),
        }
    }

    fn commits(&self) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        self.each_commit(|commit| commits.push(commit))?;
        Ok(commits)
    }

    fn stream_commits(&self, stream_id: StreamId) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        self.each_commit(|commit| {
            if commit.stream_id == stream_id {
                commits.push(commit);
            }
        })?;
        Ok(commits)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(storage_err)?;
        tracing::info!(path = %self.path.display(), "flushed rocksdb event store");
        Ok(())
    }
}

fn decode_commit(key: &[u8], blob: &[u8]) -> Result<Commit> {
    let sequence = decode_event_key(key)?;
    let stored: StoredCommit =
        bitcode::deserialize(blob).map_err(|e| StoreError::Codec(e.to_string()))?;
    Ok(Commit {
        sequence,
        stream_id: stored.stream_id,
        version: stored.version,
        event: stored.event,
    })
}

fn storage_err(err: rocksdb::Error) -> StoreError {
    StoreError::Storage(err.to_string())
}
