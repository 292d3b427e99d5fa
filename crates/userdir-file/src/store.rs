//! Filesystem storage for snapshots.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use userdir_core::Result;
use userdir_core::error::{InvalidInputError, StorageError};
use userdir_core::traits::SnapshotStorage;

fn map_io(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Filesystem-backed [`SnapshotStorage`].
///
/// Each key is one JSON file under the root directory. Writes land in a
/// temporary file that is renamed over the target, so readers never see a
/// half-written snapshot. Writers to the same key are serialized with an
/// advisory lock; the last writer wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a new file storage at the given root directory.
    ///
    /// The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file that holds `key`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::StorageKey`] unless the key is a plain
    /// file stem: ASCII letters, digits, `-`, `_` and `.`, and not only dots.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        Self::check_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.lock", key))
    }

    fn check_key(key: &str) -> Result<()> {
        let reason = if key.is_empty() {
            "is empty"
        } else if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            "may only contain letters, digits, '-', '_' and '.'"
        } else if key.chars().all(|c| c == '.') {
            "cannot consist of dots only"
        } else {
            return Ok(());
        };

        Err(InvalidInputError::StorageKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }
        .into())
    }

    /// Take the exclusive lock for `key`.
    fn lock(&self, key: &str) -> Result<File> {
        fs::create_dir_all(&self.root).map_err(map_io(&self.root))?;

        let lock_path = self.lock_path(key);
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(map_io(&lock_path))?;

        lock_file.lock_exclusive().map_err(map_io(&lock_path))?;
        trace!(path = %lock_path.display(), "Acquired lock");

        Ok(lock_file)
    }

    fn unlock(&self, key: &str, lock_file: File) -> Result<()> {
        let lock_path = self.lock_path(key);
        lock_file.unlock().map_err(map_io(&lock_path))?;
        Ok(())
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io(&path)(e).into()),
        }
    }

    #[instrument(skip(self, value), fields(root = %self.root.display(), len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let lock_file = self.lock(key)?;

        let temp_path = self
            .root
            .join(format!("{}.{}.tmp", key, Uuid::new_v4().simple()));

        let write = || -> io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_data()?;
            fs::rename(&temp_path, &path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&temp_path);
            return Err(map_io(&path)(e).into());
        }

        self.unlock(key, lock_file)?;
        debug!(path = %path.display(), "Wrote snapshot");

        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let lock_file = self.lock(key)?;

        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "Removed snapshot"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(map_io(&path)(e).into()),
        }

        self.unlock(key, lock_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use userdir_core::Error;

    #[test]
    fn missing_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("users").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set("users", r#"[{"id":1}]"#).unwrap();

        assert_eq!(
            storage.get("users").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(storage.path_for("users").unwrap().ends_with("users.json"));
    }

    #[test]
    fn set_replaces_whole_value() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("users", "[1,2,3,4,5,6,7,8,9]").unwrap();
        storage.set("users", "[1]").unwrap();

        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("users", "[]").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn remove_deletes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("users", "[1]").unwrap();
        storage.remove("users").unwrap();

        assert!(!storage.path_for("users").unwrap().exists());
        assert_eq!(storage.get("users").unwrap(), None);
        storage.remove("users").unwrap();
    }

    #[test]
    fn unsafe_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["a/b", "a:b", "..", ".", "", "../users"] {
            assert!(
                matches!(
                    storage.set(key, "[]"),
                    Err(Error::InvalidInput(InvalidInputError::StorageKey { .. }))
                ),
                "key {key:?} should be rejected"
            );
            assert!(storage.get(key).is_err());
            assert!(storage.remove(key).is_err());
        }

        // Distinct keys never share a file.
        storage.set("a_b", "[1]").unwrap();
        assert!(storage.get("a/b").is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn dotted_keys_are_allowed() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("users.v2", "[]").unwrap();
        assert!(storage.path_for("users.v2").unwrap().ends_with("users.v2.json"));
    }
}
