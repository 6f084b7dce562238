//! Key-value persistence for snapshots.
//!
//! Every piece of state lives under one of three keys:
//! ```text
//! <DATA_DIR>/
//!   auth.json
//!   foods.json
//!   theme.json
//! ```
//!
//! [`FileStorage`] is the on-disk backend used by the CLI. [`MemoryStorage`]
//! keeps everything in a shared map and is used by tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

/// Keys of the persisted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Auth,
    Foods,
    Theme,
}

impl StorageKey {
    pub fn name(&self) -> &'static str {
        match self {
            StorageKey::Auth => "auth",
            StorageKey::Foods => "foods",
            StorageKey::Theme => "theme",
        }
    }

    /// Returns the filename used by [`FileStorage`].
    pub fn filename(&self) -> &'static str {
        match self {
            StorageKey::Auth => "auth.json",
            StorageKey::Foods => "foods.json",
            StorageKey::Theme => "theme.json",
        }
    }
}

/// Errors that can occur while reading or writing persisted entries.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("Failed to serialize '{0}': {1}")]
    Serialize(&'static str, #[source] serde_json::Error),
}

/// A flat string key-value store.
///
/// Writes replace the whole value for a key; readers never observe a
/// partially written value.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}

/// File-backed storage, one file per key inside `data_dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: StorageKey) -> PathBuf {
        self.data_dir.join(key.filename())
    }

    pub fn exists(&self, key: StorageKey) -> bool {
        self.path(key).exists()
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }

    /// Writes to a sibling temp file, then renames it over the target.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::Io(self.data_dir.clone(), e))?;

        let path = self.path(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, value).map_err(|e| StorageError::Io(tmp_path.clone(), e))?;
        fs::rename(&tmp_path, &path).map_err(|e| StorageError::Io(path, e))?;

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        let path = self.path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }
}

/// In-memory storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<StorageKey, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the raw value stored under `key`.
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.entries.borrow().get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_path() {
        let (storage, _temp) = test_storage();
        assert!(storage.path(StorageKey::Foods).ends_with("foods.json"));
        assert!(storage.path(StorageKey::Auth).ends_with("auth.json"));
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let (storage, _temp) = test_storage();
        assert!(storage.get(StorageKey::Foods).unwrap().is_none());
        assert!(!storage.exists(StorageKey::Foods));
    }

    #[test]
    fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let storage = FileStorage::new(nested_dir.clone());

        storage.set(StorageKey::Theme, "\"dark\"").unwrap();

        assert!(nested_dir.exists());
        assert!(storage.exists(StorageKey::Theme));
    }

    #[test]
    fn test_set_overwrites_and_leaves_no_temp_file() {
        let (storage, temp) = test_storage();

        storage.set(StorageKey::Foods, "[1]").unwrap();
        storage.set(StorageKey::Foods, "[2]").unwrap();

        assert_eq!(storage.get(StorageKey::Foods).unwrap().as_deref(), Some("[2]"));
        assert!(!temp.path().join("foods.json.tmp").exists());
    }

    #[test]
    fn test_remove() {
        let (storage, _temp) = test_storage();

        storage.set(StorageKey::Auth, "{}").unwrap();
        storage.remove(StorageKey::Auth).unwrap();
        assert!(storage.get(StorageKey::Auth).unwrap().is_none());

        // Removing again is fine
        storage.remove(StorageKey::Auth).unwrap();
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let view = storage.clone();

        storage.set(StorageKey::Foods, "[]").unwrap();
        assert_eq!(view.raw(StorageKey::Foods).as_deref(), Some("[]"));
        assert_eq!(view.len(), 1);

        view.remove(StorageKey::Foods).unwrap();
        assert!(storage.is_empty());
    }
}
