//! Key-value persistence backends for session data
//!
//! The platform only needs to offer string get/set/remove/clear semantics.
//! `FileBackend` keeps the whole namespace as a single JSON object on disk
//! and rewrites it on every mutation, so a completed `set` is durable.
//! `MemoryBackend` backs tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::SessionResult;

/// Persistent key-value namespace used by the session store.
///
/// `set` and `clear` must be durable before they return; `get` answers
/// `None` for missing keys and for unreadable storage.
pub trait KeyValueBackend: Send + Sync {
    /// Get a stored value by key
    fn get(&self, key: &str) -> Option<String>;

    /// Set a key-value pair, durable before return
    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Remove a single key
    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Erase every stored key
    fn clear(&self) -> SessionResult<()>;
}

/// File-backed key-value store.
///
/// The namespace is stored as one JSON object; every mutation loads the
/// snapshot, applies the change, and rewrites the file. The parent
/// directory is created on first write and a missing file reads as empty.
pub struct FileBackend {
    path: PathBuf,
    // serializes in-process load-modify-write cycles on the snapshot file
    lock: Mutex<()>,
}

impl FileBackend {
    /// Create a backend storing its snapshot at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> SessionResult<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(entries)?)?;
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.guard();
        self.load().ok().and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let _guard = self.guard();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory key-value store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        self.entries().remove(key);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.entries().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_set_get_remove_clear() -> SessionResult<()> {
        let backend = MemoryBackend::new();

        backend.set("auth_token", "abc")?;
        assert_eq!(backend.get("auth_token"), Some("abc".to_string()));

        backend.remove("auth_token")?;
        assert_eq!(backend.get("auth_token"), None);

        backend.set("a", "1")?;
        backend.set("b", "2")?;
        backend.clear()?;
        assert_eq!(backend.get("a"), None);
        assert_eq!(backend.get("b"), None);

        Ok(())
    }

    #[test]
    fn file_backend_round_trip() -> SessionResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        let backend = FileBackend::new(&path);

        assert_eq!(backend.get("auth_token"), None);

        backend.set("auth_token", "abc")?;
        assert_eq!(backend.get("auth_token"), Some("abc".to_string()));

        backend.set("auth_token", "def")?;
        assert_eq!(backend.get("auth_token"), Some("def".to_string()));

        Ok(())
    }

    #[test]
    fn file_backend_persists_across_instances() -> SessionResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        FileBackend::new(&path).set("user_id", "7")?;

        let reopened = FileBackend::new(&path);
        assert_eq!(reopened.get("user_id"), Some("7".to_string()));

        Ok(())
    }

    #[test]
    fn file_backend_clear_erases_everything() -> SessionResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        let backend = FileBackend::new(&path);

        backend.set("auth_token", "abc")?;
        backend.set("user_id", "7")?;
        backend.clear()?;

        assert_eq!(backend.get("auth_token"), None);
        assert_eq!(backend.get("user_id"), None);
        // clearing twice is harmless
        backend.clear()?;

        Ok(())
    }

    #[test]
    fn file_backend_creates_parent_directory() -> SessionResult<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("data").join("session.json");
        let backend = FileBackend::new(&path);

        backend.set("auth_token", "abc")?;
        assert_eq!(backend.get("auth_token"), Some("abc".to_string()));

        Ok(())
    }
}
