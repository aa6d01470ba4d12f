//! Key-value persistence for widget data

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, info};

/// String-keyed store of serialized values
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Volatile store, used for `--in-memory` runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock memory store: {}", e))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock memory store: {}", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every entry is kept in memory; each `set` rewrites the whole file through
/// a temporary sibling that is synced to disk before the rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| format!("Store file {} is corrupt: {}", path.display(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Store file {} not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(format!("Failed to read store file {}: {}", path.display(), e)),
        };

        debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize store: {}", e))?;

        let tmp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)
            .map_err(|e| format!("Failed to create {}: {}", tmp_path.display(), e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| format!("Failed to write {}: {}", tmp_path.display(), e))?;
        file.sync_all()
            .map_err(|e| format!("Failed to sync {}: {}", tmp_path.display(), e))?;
        drop(file);
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| format!("Failed to replace {}: {}", self.path.display(), e))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?;

        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.write_file(&entries) {
            // Keep memory consistent with what is on disk
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }

        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }
}
