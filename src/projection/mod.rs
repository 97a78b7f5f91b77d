//! Read models derived by folding the event log.
//!
//! Each read model implements [`Projection`] and is attached to the log through
//! [`Projected`], which replays history and then receives live commits through
//! the same `apply`.
//!
//! ## Example
//!
//! ```ignore
//! let log = EventLog::new(InMemoryEventStore::new());
//! let reviews = Projected::<ReviewProjection>::start(&log)?;
//!
//! // ... commands record events ...
//!
//! let next = reviews.next_card_upto(today);
//! ```

mod card_editor;
mod models;
mod review;
pub mod template;

use std::sync::{Arc, PoisonError, RwLock};

use crate::commit::Version;
use crate::error::Result;
use crate::event::Event;
use crate::event_log::{EventListener, EventLog};
use crate::store::EventStore;
use crate::stream_id::StreamId;

pub use crate::replay::{project, Projection};
pub use card_editor::{CardEditorProjection, CardModel, EditableCard};
pub use models::Models;
pub use review::{Card, ReviewProjection};

/// A projection shared between the log (as a listener) and its readers.
pub struct Projected<P> {
    state: RwLock<P>,
}

impl<P: Projection + 'static> Projected<P> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(P::default()),
        }
    }

    /// Create the projection and subscribe it to `log`.
    pub fn start<S: EventStore>(log: &EventLog<S>) -> Result<Arc<Self>> {
        let projected = Arc::new(Self::new());
        log.subscribe(projected.clone())?;
        Ok(projected)
    }

    pub fn read<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl<P: Projection + 'static> Default for Projected<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Projection> EventListener for Projected<P> {
    fn handle_event(&self, stream_id: StreamId, event: &Event, version: Version) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.apply(stream_id, event, version);
    }
}
