//! Key layout of the durable backend.
//!
//! Event keys are `event/` followed by the global sequence as 16 lowercase hex
//! digits, so lexicographic key order is commit order.

use crate::error::{Result, StoreError};
use crate::stream_id::StreamId;

pub const EVENT_PREFIX: &str = "event/";
pub const GLOBAL_VERSION_KEY: &str = "global_sequence";

pub fn event_key(sequence: u64) -> String {
    format!("{}{:016x}", EVENT_PREFIX, sequence)
}

pub fn decode_event_key(key: &[u8]) -> Result<u64> {
    let key = std::str::from_utf8(key)
        .map_err(|_| StoreError::CorruptKey(String::from_utf8_lossy(key).into_owned()))?;
    let digits = key
        .strip_prefix(EVENT_PREFIX)
        .filter(|digits| digits.len() == 16)
        .ok_or_else(|| StoreError::CorruptKey(key.to_string()))?;
    u64::from_str_radix(digits, 16).map_err(|_| StoreError::CorruptKey(key.to_string()))
}

pub fn stream_version_key(stream_id: StreamId) -> String {
    format!("stream/{}/version", stream_id.to_guid())
}
