//! File-backed storage: one JSON file per key under a state directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StorageAdapter, StorageError};

/// Persists each key as `<state_dir>/<key>.json`.
///
/// Keys are internal constants (`cart`, `favorites`), not user input, so no
/// path sanitation is applied.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The state directory backing this storage.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StorageAdapter for FileStorage {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let temp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp.path()).unwrap();

        storage.save("cart", r#"{"version":1,"items":[]}"#).unwrap();
        assert_eq!(
            storage.load("cart").unwrap(),
            r#"{"version":1,"items":[]}"#
        );
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let temp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp.path()).unwrap();
        assert!(storage.load("favorites").is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp.path()).unwrap();

        storage.save("cart", "first").unwrap();
        storage.save("cart", "second").unwrap();
        assert_eq!(storage.load("cart").unwrap(), "second");
    }

    #[test]
    fn test_new_creates_nested_dir() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a/b/state");
        let storage = FileStorage::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.dir(), nested.as_path());
    }
}
