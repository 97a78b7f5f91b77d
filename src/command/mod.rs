//! Command handlers: rebuild the target stream, validate, then record with the
//! stream's current version as the precondition.
//!
//! Handlers never retry. A [`StoreError::VersionConflict`](crate::StoreError)
//! means someone else wrote to the stream first; the caller decides what to do.

mod card_editing;
mod model_editing;
mod review_scoring;

pub use card_editing::CardEditing;
pub use model_editing::ModelEditing;
pub use review_scoring::{next_interval, ReviewScoring, ReviewableCard};
