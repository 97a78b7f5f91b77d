use thiserror::Error;

use crate::commit::{ExpectedVersion, Version};
use crate::stream_id::StreamId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(
        "concurrent write detected for stream {} (expected version {}, got {})",
        .stream_id,
        .expected,
        fmt_actual(.actual)
    )]
    VersionConflict {
        stream_id: StreamId,
        expected: ExpectedVersion,
        actual: Option<Version>,
    },

    #[error("event store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("not an event key: {0:?}")]
    CorruptKey(String),

    #[error("configuration error: {0}")]
    Config(String),
}

fn fmt_actual(actual: &Option<Version>) -> String {
    match actual {
        Some(version) => version.to_string(),
        None => "no stream".to_string(),
    }
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("missing fields: {missing:?}, got: {supplied:?}")]
    MissingFields {
        supplied: Vec<String>,
        missing: Vec<String>,
    },

    #[error("unknown card model {0}")]
    UnknownModel(StreamId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommandError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, CommandError::Store(err) if err.is_conflict())
    }
}
