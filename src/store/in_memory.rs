use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::EventStore;
use crate::commit::{Commit, ExpectedVersion, Version};
use crate::error::{Result, StoreError};
use crate::event::Event;
use crate::stream_id::StreamId;

#[derive(Default)]
struct Inner {
    commits: Vec<Commit>,
    stream_versions: HashMap<StreamId, Version>,
}

/// Vec-backed event store for tests and throwaway sessions.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    fn append(
        &self,
        stream_id: StreamId,
        event: Event,
        expected: ExpectedVersion,
    ) -> Result<Commit> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let actual = inner.stream_versions.get(&stream_id).copied();
        if !expected.matches(actual) {
            return Err(StoreError::VersionConflict {
                stream_id,
                expected,
                actual,
            });
        }

        let commit = Commit {
            sequence: inner.commits.len() as u64,
            stream_id,
            version: expected.next(),
            event,
        };
        inner.stream_versions.insert(stream_id, commit.version);
        inner.commits.push(commit.clone());

        Ok(commit)
    }

    fn stream_version(&self, stream_id: StreamId) -> Result<Option<Version>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.stream_versions.get(&stream_id).copied())
    }

    fn count(&self) -> Result<u64> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.commits.len() as u64)
    }

    fn commits(&self) -> Result<Vec<Commit>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner.commits.clone())
    }

    fn stream_commits(&self, stream_id: StreamId) -> Result<Vec<Commit>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(inner
            .commits
            .iter()
            .filter(|commit| commit.stream_id == stream_id)
            .cloned()
            .collect())
    }
}
