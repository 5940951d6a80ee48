//! Per-app key-value storage
//!
//! The budget document and the "ready for budget" flag each live in a named
//! slot. [`FileKeyValueStore`] keeps one file per slot inside the data
//! directory; [`MemoryKeyValueStore`] keeps everything in a map for tests and
//! embedding.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PocketError, PocketResult};

use super::file_io::{read_if_exists, remove_if_exists, write_atomic};

/// A store of named byte slots
pub trait KeyValueStore {
    /// Read a slot, `None` if it was never written
    fn get(&self, key: &str) -> PocketResult<Option<Vec<u8>>>;

    /// Write a slot, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> PocketResult<()>;

    /// Remove a slot; removing a missing slot is not an error
    fn remove(&self, key: &str) -> PocketResult<()>;

    /// Read a boolean slot; missing or unreadable values are `false`
    fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "ignoring unreadable flag");
                false
            }),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read flag");
                false
            }
        }
    }

    /// Write a boolean slot
    fn set_bool(&self, key: &str, value: bool) -> PocketResult<()> {
        let bytes = serde_json::to_vec(&value)?;
        self.set(key, &bytes)
    }
}

fn validate_key(key: &str) -> PocketResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(PocketError::Validation(format!(
            "Invalid storage key: '{}'",
            key
        )))
    }
}

/// Key-value store backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file backing a key
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> PocketResult<Option<Vec<u8>>> {
        validate_key(key)?;
        read_if_exists(self.slot_path(key))
    }

    fn set(&self, key: &str, value: &[u8]) -> PocketResult<()> {
        validate_key(key)?;
        write_atomic(self.slot_path(key), value)
    }

    fn remove(&self, key: &str) -> PocketResult<()> {
        validate_key(key)?;
        remove_if_exists(self.slot_path(key))
    }
}

/// Key-value store held in memory
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> PocketResult<Option<Vec<u8>>> {
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> PocketResult<()> {
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> PocketResult<()> {
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.remove(key);
        Ok(())
    }
}
