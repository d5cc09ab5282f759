// Key-value storage backends for persisted state.
// The projects cache and UI preferences only ever talk to the `Storage` trait.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{FolioError, Result};

use super::paths;

/// String key-value storage that survives between runs (or pretends to).
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = paths::entry_path(&self.dir, key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = paths::entry_path(&self.dir, key);

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = paths::entry_path(&self.dir, key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Process-local storage, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| FolioError::Other("memory storage lock poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Storage for contexts with nowhere to persist: reads miss, writes vanish.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStorage;

impl Storage for NoopStorage {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

/// Pick the storage for this run: the user cache directory when one exists
/// and caching is wanted, otherwise the no-op backend.
pub fn default_storage(enabled: bool) -> Arc<dyn Storage> {
    match paths::cache_dir() {
        Some(dir) if enabled => Arc::new(FileStorage::new(dir)),
        _ => Arc::new(NoopStorage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested"));

        assert_eq!(storage.get("projects-cache").unwrap(), None);

        storage.set("projects-cache", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get("projects-cache").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.set("projects-cache", "second").unwrap();
        assert_eq!(storage.get("projects-cache").unwrap().as_deref(), Some("second"));
        assert!(!paths::entry_path(storage.dir(), "projects-cache")
            .with_extension("tmp")
            .exists());

        storage.remove("projects-cache").unwrap();
        assert_eq!(storage.get("projects-cache").unwrap(), None);
    }

    #[test]
    fn test_file_storage_remove_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.remove("nothing-here").unwrap();
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_noop_storage_never_stores() {
        let storage = NoopStorage;
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_disabled_default_storage_is_noop() {
        let storage = default_storage(false);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
