//! Persistence adapters — explicit load/save for each independently keyed record.
//!
//! Stores never touch the filesystem themselves; they own a `Persistence`
//! adapter and call `save` after every mutation.

use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load/save contract for one persisted record.
pub trait Persistence<T>: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<T>, StorageError>;
    fn save(&self, value: &T) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file backend
// ────────────────────────────────────────────────────────────────────────────

/// One pretty-printed JSON file per record. Writes go to a temp file in the
/// same directory and are renamed into place.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T> Persistence<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<T>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let json = serde_json::to_vec_pretty(value)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&json).map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ────────────────────────────────────────────────────────────────────────────

/// Process-local backend for ephemeral sessions and tests.
pub struct MemoryStore<T> {
    value: Mutex<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Persistence<T> for MemoryStore<T>
where
    T: Clone + Send,
{
    fn load(&self) -> Result<Option<T>, StorageError> {
        let guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, value: &T) -> Result<(), StorageError> {
        let mut guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(value.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}

/// Serves a fixed value and refuses every write, for exercising failed saves.
#[cfg(test)]
pub struct ReadOnlyStore<T> {
    value: Option<T>,
}

#[cfg(test)]
impl<T> ReadOnlyStore<T> {
    pub fn new(value: Option<T>) -> Self {
        Self { value }
    }

    fn refuse(&self) -> StorageError {
        StorageError::Io {
            path: PathBuf::from("read-only"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
        }
    }
}

#[cfg(test)]
impl<T> Persistence<T> for ReadOnlyStore<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> Result<Option<T>, StorageError> {
        Ok(self.value.clone())
    }

    fn save(&self, _value: &T) -> Result<(), StorageError> {
        Err(self.refuse())
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(self.refuse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_store_refuses_writes() {
        let store = ReadOnlyStore::new(Some(1u8));
        assert_eq!(store.load().unwrap(), Some(1));
        assert!(matches!(store.save(&2), Err(StorageError::Io { .. })));
        assert!(store.clear().is_err());
    }

    #[test]
    fn test_json_file_store_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<Vec<String>> = JsonFileStore::new(dir.path(), "items.json");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_file_store_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<Vec<String>> = JsonFileStore::new(dir.path(), "items.json");
        store.save(&vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(
            store.load().unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_json_file_store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let store: JsonFileStore<u32> = JsonFileStore::new(&nested, "n.json");
        store.save(&7).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_json_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let store: JsonFileStore<Vec<String>> = JsonFileStore::new(dir.path(), "bad.json");
        assert!(matches!(store.load(), Err(StorageError::Json(_))));
    }

    #[test]
    fn test_json_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<u32> = JsonFileStore::new(dir.path(), "n.json");
        store.save(&1).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryStore::with_value(3u8);
        assert_eq!(store.load().unwrap(), Some(3));
        store.save(&4).unwrap();
        assert_eq!(store.load().unwrap(), Some(4));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
