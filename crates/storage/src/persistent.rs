//! JSON layer over a [`KeyValueStore`]

use crate::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared handle that reads and writes JSON values
///
/// Reads never fail: a missing key, an unreadable backend or a value that
/// does not parse all produce `T::default()`. The last two are logged.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by `<dir>/<key>.json` files
    pub fn open_dir(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        Ok(Self::new(Arc::new(FileStore::open(dir)?)))
    }

    /// Store that lives only in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Reads and parses `key`, substituting the default on any problem
    pub fn load_json<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                log::warn!("Could not read stored {}: {}; starting empty", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Stored {} is corrupt ({}); starting empty", key, e);
                T::default()
            }
        }
    }

    /// Serializes `value` and writes it under `key`
    pub fn save_json<T>(&self, key: &str, value: &T) -> StorageResult<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }

    /// Returns the raw stored text for `key`, if any
    pub fn load_raw(&self, key: &str) -> StorageResult<Option<String>> {
        self.backend.get(key)
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend.remove(key)
    }
}

impl std::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore").finish_non_exhaustive()
    }
}
