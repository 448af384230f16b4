//! JSON file key-value store.
//!
//! Stores key-value pairs as one JSON object, by default at:
//! - Linux: ~/.config/nimbleforge/storage.json
//! - macOS: ~/Library/Application Support/io.nimbleforge.nimbleforge/storage.json
//! - Windows: C:\Users\<User>\AppData\Roaming\nimbleforge\nimbleforge\config\storage.json

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;

use crate::infrastructure::ports::{KeyValueStore, StorageError};

const FALLBACK_FILE: &str = "nimbleforge_storage.json";

/// File-backed storage with an in-memory cache of the whole file.
///
/// The file is rewritten on every mutation. A mutation only reaches the cache
/// after the write succeeded, so a failed write leaves both unchanged.
#[derive(Debug)]
pub struct JsonFileKeyValueStore {
    storage_path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileKeyValueStore {
    /// Platform config directory, or the working directory when none is known.
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("io", "nimbleforge", "nimbleforge") {
            dirs.config_dir().join("storage.json")
        } else {
            PathBuf::from(FALLBACK_FILE)
        }
    }

    /// Open the store at `path`, loading existing data.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is an
    /// error; it is never silently replaced.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let storage_path = path.into();
        let cache = match fs::read_to_string(&storage_path) {
            Ok(data) if data.trim().is_empty() => HashMap::new(),
            Ok(data) => serde_json::from_str::<HashMap<String, String>>(&data).map_err(|e| {
                StorageError::serialization(format!(
                    "{} is not a storage file: {}",
                    storage_path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::backend("open", e)),
        };

        tracing::debug!(
            path = %storage_path.display(),
            keys = cache.len(),
            "JSON file storage opened"
        );

        Ok(Self {
            storage_path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn persist(
        &self,
        operation: &'static str,
        entries: &HashMap<String, String>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::backend(operation, e))?;
            }
        }
        let data = serde_json::to_string_pretty(entries).map_err(StorageError::serialization)?;
        fs::write(&self.storage_path, data).map_err(|e| StorageError::backend(operation, e))
    }

    fn mutate(
        &self,
        operation: &'static str,
        change: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|e| StorageError::backend(operation, e))?;
        let mut next = cache.clone();
        change(&mut next);
        if let Err(e) = self.persist(operation, &next) {
            tracing::error!(
                path = %self.storage_path.display(),
                error = %e,
                "Failed to write storage file"
            );
            return Err(e);
        }
        *cache = next;
        Ok(())
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cache = self
            .cache
            .read()
            .map_err(|e| StorageError::backend("get", e))?;
        Ok(cache.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate("set", |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate("remove", |entries| {
            entries.remove(key);
        })
    }
}
