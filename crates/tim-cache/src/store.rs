//! Raw string key-value backends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::CacheError;

/// A string-to-string store with `localStorage` semantics.
///
/// Implementations are used from a single UI thread, so no `Send`/`Sync`
/// bound is required.
pub trait KeyValueStore {
    /// Read a raw value.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a raw value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// In-memory store, the default for tests and native builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("memory store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// Store backed by a single JSON object on disk.
///
/// Used by the CLI so that the cart survives between invocations the same
/// way `localStorage` survives between page loads. The file is re-read on
/// every operation; a missing file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) a store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, CacheError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            CacheError::StoreError(format!("{} is not a valid store: {}", self.path.display(), e))
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content).map_err(|e| CacheError::WriteRejected {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn locked<R>(
        &self,
        f: impl FnOnce(&Self) -> Result<R, CacheError>,
    ) -> Result<R, CacheError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| CacheError::StoreError("file store poisoned".to_string()))?;
        f(self)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.locked(|s| Ok(s.read_map()?.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.locked(|s| {
            let mut map = s.read_map()?;
            map.insert(key.to_string(), value.to_string());
            s.write_map(&map)
        })
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.locked(|s| {
            let mut map = s.read_map()?;
            if map.remove(key).is_some() {
                s.write_map(&map)?;
            }
            Ok(())
        })
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.locked(|s| Ok(s.read_map()?.keys().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_memory_store_keys_sorted() {
        let store = MemoryStore::new();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileStore::new(&path).set("tim_cart_v1", "[]").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("tim_cart_v1").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("k").is_err());
    }
}
