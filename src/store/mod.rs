//! Storage backends for the event log.
//!
//! A backend owns the commits and the per-stream version index. It checks the
//! expected version and persists the commit as one atomic step; fan-out to
//! subscribers is the [`EventLog`](crate::EventLog)'s job.

mod in_memory;
pub mod keys;
#[cfg(feature = "rocksdb")]
mod durable;

use crate::commit::{Commit, ExpectedVersion, Version};
use crate::error::Result;
use crate::event::Event;
use crate::stream_id::StreamId;

pub use in_memory::InMemoryEventStore;
#[cfg(feature = "rocksdb")]
pub use durable::{RocksDbEventStore, RocksDbOptions};

pub trait EventStore: Send + Sync {
    /// Append `event` to `stream_id` iff `expected` matches the stream's last
    /// committed version. Returns the stored commit.
    fn append(&self, stream_id: StreamId, event: Event, expected: ExpectedVersion)
        -> Result<Commit>;

    /// Last committed version of the stream, or `None` if it has no events.
    fn stream_version(&self, stream_id: StreamId) -> Result<Option<Version>>;

    /// Number of commits across all streams.
    fn count(&self) -> Result<u64>;

    /// Every commit, in global order.
    fn commits(&self) -> Result<Vec<Commit>>;

    /// Commits of a single stream, in order.
    fn stream_commits(&self, stream_id: StreamId) -> Result<Vec<Commit>> {
        Ok(self
            .commits()?
            .into_iter()
            .filter(|commit| commit.stream_id == stream_id)
            .collect())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl<S: EventStore + ?Sized> EventStore for Box<S> {
    fn append(
        &self,
        stream_id: StreamId,
        event: Event,
        expected: ExpectedVersion,
    ) -> Result<Commit> {
        (**self).append(stream_id, event, expected)
    }

    fn stream_version(&self, stream_id: StreamId) -> Result<Option<Version>> {
        (**self).stream_version(stream_id)
    }

    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn commits(&self) -> Result<Vec<Commit>> {
        (**self).commits()
    }

    fn stream_commits(&self, stream_id: StreamId) -> Result<Vec<Commit>> {
        (**self).stream_commits(stream_id)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}
