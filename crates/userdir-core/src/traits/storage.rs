//! Snapshot storage trait.

use crate::Result;

/// A string key-value store holding serialized snapshots.
///
/// Implementations replace a value wholesale on every `set`; there are no
/// partial writes. Concurrent writers are not coordinated beyond whatever the
/// backend offers, so the last writer wins.
pub trait SnapshotStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
