//! String-keyed persistence backends
//!
//! Presets and history each live under one key as a JSON array. Stores are
//! injected into the preset/history managers so tests can use memory and
//! the CLI can use files.

pub mod file;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

pub use file::FileStore;

/// Namespace used when the configuration does not name one
pub const DEFAULT_NAMESPACE: &str = "task-search";

#[derive(Debug, Error)]
pub enum StoreError {
    /// No backend exists in this context
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous key-value store holding serialized collections
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Storage keys for one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub presets: String,
    pub history: String,
}

impl StorageKeys {
    pub fn new(namespace: &str) -> Self {
        Self {
            presets: format!("{}:filter-presets", namespace),
            history: format!("{}:search-history", namespace),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// Read a JSON array stored under `key`.
///
/// A missing key is an empty collection. Items that no longer deserialize
/// are logged and skipped so the rest survive the next write. Content that
/// is not a JSON array at all reads as empty.
pub fn read_collection<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let values: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Ignoring unreadable collection under {}: {}", key, e);
            return Ok(Vec::new());
        }
    };

    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping item {} under {}: {}", index, key, e);
                None
            }
        })
        .collect();

    if items.len() < total {
        warn!("Read {} of {} items under {}", items.len(), total, key);
    }
    Ok(items)
}

/// Replace the JSON array stored under `key`
pub fn write_collection<T: Serialize>(
    store: &dyn Store,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(items)
        .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    store.set(key, &raw)
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Stand-in for contexts with no persistence at all
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl Store for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("no storage backend configured".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("no storage backend configured".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("no storage backend configured".to_string()))
    }
}
