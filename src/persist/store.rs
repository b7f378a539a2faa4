//! Key-value stores for persisted timer state

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

/// Durable key-value store for small textual values
///
/// Only ever written by one logical writer (the persistence scheduler), so no
/// cross-writer discipline is required.
pub trait TimeStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<String>, String>;

    /// Write `value` under `key`, replacing any previous value
    fn store(&self, key: &str, value: &str) -> Result<(), String>;

    /// Delete the value stored under `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// File-backed store: each key maps to a file inside a data directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: &Path) -> Result<Self, String> {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create data directory {}: {}", dir.display(), e))?;
        debug!("Using data directory {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TimeStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("Failed to read {}: {}", key, e)),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), String> {
        fs::write(self.path_for(key), value).map_err(|e| format!("Failed to write {}: {}", key, e))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to remove {}: {}", key, e)),
        }
    }
}

/// In-memory store for tests and embedded use
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?;
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?;
        entries.remove(key);
        Ok(())
    }
}
