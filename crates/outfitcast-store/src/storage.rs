//! Durable key/value storage for persisted store slices.
//!
//! Each record is written as a JSON envelope `{"state": ..., "version": 0}`
//! under its own key and overwritten wholesale on every save.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Current envelope version
pub const RECORD_VERSION: u32 = 0;

/// Backing store for serialized records.
pub trait DurableStorage: Send + Sync {
    /// Raw record for `key`, or `None` if nothing was stored yet.
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedRecord<T> {
    pub state: T,
    pub version: u32,
}

/// Read and decode the record stored under `key`.
pub fn read_record<T: DeserializeOwned>(storage: &dyn DurableStorage, key: &str) -> Result<Option<T>> {
    let Some(raw) = storage.load(key)? else {
        return Ok(None);
    };

    let record: PersistedRecord<T> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to decode persisted record '{}'", key))?;

    if record.version != RECORD_VERSION {
        tracing::warn!(
            key,
            version = record.version,
            "Persisted record has unexpected version, loading anyway"
        );
    }

    Ok(Some(record.state))
}

/// Encode `state` in the envelope and store it under `key`.
pub fn write_record<T: Serialize>(storage: &dyn DurableStorage, key: &str, state: &T) -> Result<()> {
    let record = PersistedRecord {
        state,
        version: RECORD_VERSION,
    };
    let json = serde_json::to_string(&record)
        .with_context(|| format!("Failed to encode persisted record '{}'", key))?;
    storage.save(key, &json)
}

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for records, creating it if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {:?}", dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read record file {:?}", path))?;
        tracing::debug!("Loaded record {} from {:?}", key, path);
        Ok(Some(json))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write record file {:?}", path))?;
        tracing::debug!("Stored record {} at {:?}", key, path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete record file {:?}", path))?;
            tracing::debug!("Deleted record {}", key);
        }
        Ok(())
    }
}

/// Process-local storage, used in tests and when no data directory is set.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DurableStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
