mod commit;
mod error;
mod event;
mod event_log;
mod replay;
mod stream_id;

pub mod command;
pub mod config;
pub mod projection;
pub mod store;

pub use command::{CardEditing, ModelEditing, ReviewScoring, ReviewableCard};
pub use commit::{Commit, ExpectedVersion, Version};
pub use config::{Backend, StoreConfig};
pub use error::{CommandError, Result, StoreError};
pub use event::{Event, Score, UnknownScore};
pub use event_log::{EventListener, EventLog};
pub use projection::{
    Card, CardEditorProjection, CardModel, EditableCard, Models, Projected, Projection,
    ReviewProjection,
};
pub use replay::{fold, hydrate, project, Aggregate, StreamVersion};
pub use store::{EventStore, InMemoryEventStore};
#[cfg(feature = "rocksdb")]
pub use store::{RocksDbEventStore, RocksDbOptions};
pub use stream_id::StreamId;
