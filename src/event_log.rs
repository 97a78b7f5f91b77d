//! The event log: optimistic-concurrency writes with synchronous fan-out.

use std::sync::{Arc, Mutex, PoisonError};

use crate::commit::{ExpectedVersion, Version};
use crate::error::{Result, StoreError};
use crate::event::Event;
use crate::store::EventStore;
use crate::stream_id::StreamId;

/// Receives every commit, historical ones first, then live ones.
pub trait EventListener: Send + Sync {
    fn handle_event(&self, stream_id: StreamId, event: &Event, version: Version);
}

impl<F> EventListener for F
where
    F: Fn(StreamId, &Event, Version) + Send + Sync,
{
    fn handle_event(&self, stream_id: StreamId, event: &Event, version: Version) {
        self(stream_id, event, version)
    }
}

/// Append-only log of commits over a storage backend.
///
/// Writes and subscriptions share one critical section: a listener attached by
/// [`subscribe`](Self::subscribe) sees the full history and then every later
/// commit, with nothing missed or repeated in between.
///
/// Listeners are notified while that critical section is held, so a listener
/// must never call [`record`](Self::record) on the same log from
/// `handle_event`. Doing so deadlocks.
pub struct EventLog<S> {
    store: S,
    subscribers: Mutex<Vec<Arc<dyn EventListener>>>,
}

impl<S: EventStore> EventLog<S> {
    pub fn new(store: S) -> Self {
        EventLog {
            store,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append `event` to `stream_id` if the stream is still at `expected`.
    ///
    /// On success every subscriber has handled the event before this returns,
    /// and the new per-stream version is returned. On conflict nothing is
    /// written and nobody is notified.
    pub fn record(
        &self,
        stream_id: StreamId,
        event: Event,
        expected: impl Into<ExpectedVersion>,
    ) -> Result<Version> {
        let expected = expected.into();
        let subscribers = self
            .subscribers
            .lock()
            .map_err(|_| StoreError::LockPoisoned("record"))?;

        let commit = match self.store.append(stream_id, event, expected) {
            Ok(commit) => commit,
            Err(err) => {
                if err.is_conflict() {
                    tracing::warn!(%stream_id, %expected, "rejected write: {}", err);
                }
                return Err(err);
            }
        };

        tracing::debug!(
            %stream_id,
            version = commit.version,
            sequence = commit.sequence,
            event = commit.event.name(),
            "recorded event"
        );

        for subscriber in subscribers.iter() {
            subscriber.handle_event(commit.stream_id, &commit.event, commit.version);
        }

        Ok(commit.version)
    }

    /// Replay the whole log to `listener`, then register it for live events.
    pub fn subscribe(&self, listener: Arc<dyn EventListener>) -> Result<()> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| StoreError::LockPoisoned("subscribe"))?;

        let history = self.store.commits()?;
        for commit in &history {
            listener.handle_event(commit.stream_id, &commit.event, commit.version);
        }
        subscribers.push(listener);

        tracing::info!(
            replayed = history.len(),
            subscribers = subscribers.len(),
            "attached subscriber"
        );
        Ok(())
    }

    /// Events of one stream with their versions, in commit order.
    pub fn events_for_stream(&self, stream_id: StreamId) -> Result<Vec<(Event, Version)>> {
        Ok(self
            .store
            .stream_commits(stream_id)?
            .into_iter()
            .map(|commit| (commit.event, commit.version))
            .collect())
    }

    pub fn stream_version(&self, stream_id: StreamId) -> Result<Option<Version>> {
        self.store.stream_version(stream_id)
    }

    /// Number of commits in the log.
    pub fn count(&self) -> Result<u64> {
        self.store.count()
    }

    /// Global position of the log; the sequence the next commit will take.
    pub fn current_version(&self) -> Result<u64> {
        self.count()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Flush the backend and release it.
    pub fn close(self) -> Result<()> {
        self.store.flush()
    }
}
