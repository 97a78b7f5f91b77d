//! Store configuration.
//!
//! ```json
//! { "backend": { "rocks_db": { "path": "/var/lib/srs/events" } }, "sync_writes": true }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::event_log::EventLog;
use crate::store::{EventStore, InMemoryEventStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    InMemory,
    RocksDb {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Create the database directory if it does not exist (default: true)
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,

    /// fsync every append (default: false)
    #[serde(default)]
    pub sync_writes: bool,
}

fn default_create_if_missing() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            create_if_missing: default_create_if_missing(),
            sync_writes: false,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn rocksdb(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::RocksDb { path: path.into() },
            ..Self::default()
        }
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Open the configured backend.
    pub fn open_store(&self) -> Result<Box<dyn EventStore>> {
        match &self.backend {
            Backend::InMemory => Ok(Box::new(InMemoryEventStore::new())),
            #[cfg(feature = "rocksdb")]
            Backend::RocksDb { path } => {
                let options = crate::store::RocksDbOptions {
                    create_if_missing: self.create_if_missing,
                    sync_writes: self.sync_writes,
                };
                Ok(Box::new(crate::store::RocksDbEventStore::open_with(
                    path, options,
                )?))
            }
            #[cfg(not(feature = "rocksdb"))]
            Backend::RocksDb { .. } => Err(StoreError::Config(
                "built without the rocksdb feature".to_string(),
            )),
        }
    }
}

/// Open an event log over the configured backend.
pub fn open(config: &StoreConfig) -> Result<EventLog<Box<dyn EventStore>>> {
    let store = config.open_store()?;
    tracing::info!(backend = ?config.backend, "opened event log");
    Ok(EventLog::new(store))
}
