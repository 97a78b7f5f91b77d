//! Rebuilding state by folding over history.
//!
//! Command-side aggregates and read-side projections both derive their state
//! through [`fold`], so a given event always takes the same path.

use crate::commit::{Commit, Version};
use crate::error::Result;
use crate::event::Event;
use crate::event_log::EventLog;
use crate::store::EventStore;
use crate::stream_id::StreamId;

/// Left fold of `history` into `init`.
pub fn fold<S, I, F>(init: S, history: I, apply: F) -> S
where
    I: IntoIterator,
    F: FnMut(S, I::Item) -> S,
{
    history.into_iter().fold(init, apply)
}

/// Command-side state rebuilt from a single stream before a write.
pub trait Aggregate: Sized {
    fn empty(id: StreamId) -> Self;

    fn apply(self, event: &Event, version: Version) -> Self;
}

/// Load an aggregate by replaying its stream.
pub fn hydrate<A, S>(log: &EventLog<S>, id: StreamId) -> Result<A>
where
    A: Aggregate,
    S: EventStore,
{
    let history = log.events_for_stream(id)?;
    Ok(fold(A::empty(id), history, |aggregate, (event, version)| {
        aggregate.apply(&event, version)
    }))
}

/// Tracks nothing but the stream's last version; enough for writers that
/// validate against other state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamVersion {
    pub id: StreamId,
    pub version: Option<Version>,
}

impl Aggregate for StreamVersion {
    fn empty(id: StreamId) -> Self {
        StreamVersion { id, version: None }
    }

    fn apply(self, _event: &Event, version: Version) -> Self {
        StreamVersion {
            version: Some(version),
            ..self
        }
    }
}

/// Read-side fold over the whole log.
pub trait Projection: Default + Send + Sync {
    fn apply(&mut self, stream_id: StreamId, event: &Event, version: Version);
}

/// Build a projection from scratch out of `commits`.
pub fn project<P: Projection>(commits: impl IntoIterator<Item = Commit>) -> P {
    fold(P::default(), commits, |mut projection, commit| {
        projection.apply(commit.stream_id, &commit.event, commit.version);
        projection
    })
}
