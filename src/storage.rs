//! Durable key-value storage for session state.
//!
//! The session keeps exactly two keys here: the bearer token and the
//! serialized current user. [`FileStorage`] persists them as a small JSON
//! object on disk; [`MemoryStorage`] keeps them in process for tests and
//! embedders that manage persistence themselves.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;

/// String key-value storage that survives across client runs.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// JSON-file storage. Every call re-reads the file so separate client
/// processes observe each other's logins and logouts.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage at the default session path.
    pub fn open_default() -> Self {
        Self::new(crate::paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable session file {}: {e}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _lock = self.lock.lock();
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _lock = self.lock.lock();
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _lock = self.lock.lock();
        let mut entries = self.read_entries();
        if entries.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").is_none());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
        // removing again is fine
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let first = FileStorage::new(&path);
        first.set("tickkk_token", "abc").unwrap();

        let second = FileStorage::new(&path);
        assert_eq!(second.get("tickkk_token").as_deref(), Some("abc"));

        second.remove("tickkk_token").unwrap();
        assert!(first.get("tickkk_token").is_none());
    }

    #[test]
    fn test_file_storage_removing_last_key_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);
        storage.set("tickkk_token", "abc").unwrap();
        storage.set("tickkk_user", "{}").unwrap();

        storage.remove("tickkk_token").unwrap();
        assert!(path.exists());
        assert_eq!(storage.get("tickkk_user").as_deref(), Some("{}"));

        storage.remove("tickkk_user").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_remove_without_file_does_not_create_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileStorage::new(&path);
        storage.remove("tickkk_token").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_file_storage_corrupt_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(&path);
        assert!(storage.get("tickkk_token").is_none());
        storage.set("tickkk_token", "fresh").unwrap();
        assert_eq!(storage.get("tickkk_token").as_deref(), Some("fresh"));
    }
}
