use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::stream_id::StreamId;

/// Position of an event within its own stream, starting at 0.
pub type Version = u64;

/// Write precondition checked by [`EventLog::record`](crate::EventLog::record).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpectedVersion {
    /// The stream must not have any events yet.
    NoStream,
    /// The stream's last committed version must be exactly this.
    Exact(Version),
}

impl ExpectedVersion {
    pub fn matches(&self, current: Option<Version>) -> bool {
        match (self, current) {
            (ExpectedVersion::NoStream, None) => true,
            (ExpectedVersion::Exact(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }

    /// Version the next commit on the stream will receive.
    pub fn next(&self) -> Version {
        match self {
            ExpectedVersion::NoStream => 0,
            ExpectedVersion::Exact(version) => version + 1,
        }
    }
}

impl From<Option<Version>> for ExpectedVersion {
    fn from(version: Option<Version>) -> Self {
        match version {
            Some(version) => ExpectedVersion::Exact(version),
            None => ExpectedVersion::NoStream,
        }
    }
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedVersion::NoStream => f.write_str("no stream"),
            ExpectedVersion::Exact(version) => write!(f, "{}", version),
        }
    }
}

/// One persisted event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Global position across all streams.
    pub sequence: u64,
    pub stream_id: StreamId,
    pub version: Version,
    pub event: Event,
}
