//! Key-value store abstraction and its in-memory implementation

use serde_json::{Map, Value};
use std::sync::Mutex;

use crate::Result;

/// JSON values keyed by name
pub type Entries = Map<String, Value>;

/// Minimal persistence interface: get, set, remove, clear.
pub trait KeyValueStore {
    /// Fetch the given keys. Missing keys are absent from the result.
    fn get(&self, keys: &[&str]) -> Result<Entries>;

    /// Insert or overwrite every entry.
    fn set(&self, entries: Entries) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Drop every stored key.
    fn clear(&self) -> Result<()>;
}

/// Process-local store, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> Result<Entries> {
        let entries = self.lock();
        Ok(keys
            .iter()
            .filter_map(|k| entries.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    fn set(&self, new_entries: Entries) -> Result<()> {
        self.lock().extend(new_entries);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }
}
