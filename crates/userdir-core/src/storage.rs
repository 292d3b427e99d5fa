//! In-memory snapshot storage.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, instrument};

use crate::Result;
use crate::error::StorageError;
use crate::traits::SnapshotStorage;

/// A [`SnapshotStorage`] that keeps values in process memory.
///
/// Useful for tests and for running without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-filled with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.write() {
            entries.insert(key.into(), value.into());
        }
        storage
    }

    /// Returns true if `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        debug!("Stored value in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        if entries.remove(key).is_some() {
            debug!("Removed value from memory");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("users").unwrap(), None);

        storage.set("users", "[]").unwrap();
        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[]"));
        assert!(storage.contains("users"));

        storage.remove("users").unwrap();
        assert!(!storage.contains("users"));
        storage.remove("users").unwrap();
    }

    #[test]
    fn with_entry_prefills() {
        let storage = MemoryStorage::with_entry("users", "[1]");
        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[1]"));
    }
}
