//! Key/value persistence for study progress.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::storage::STORE_FILE_NAME;
use crate::error::AppError;

/// String key/value persistence. Values are JSON-encoded by callers.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError>;

    /// Writes several entries as one step. Stores that can persist atomically
    /// override this; the default writes one key at a time.
    fn set_many(&mut self, entries: Vec<(String, String)>) -> Result<(), AppError> {
        for (key, value) in entries {
            self.set(&key, value)?;
        }
        Ok(())
    }
}

/// In-memory store, used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole file through a temporary file and a rename,
/// so a crash never leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens `progress.json` inside `dir`, creating nothing until the first write.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::open_file(dir.as_ref().join(STORE_FILE_NAME))
    }

    /// Opens a store at an explicit file path.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    AppError::storage_error(format!(
                        "Progress store '{}' is corrupt: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            debug!("Progress store {} does not exist yet", path.display());
            BTreeMap::new()
        };

        info!(
            "Opened progress store {} with {} entries",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn set_many(&mut self, entries: Vec<(String, String)>) -> Result<(), AppError> {
        self.entries.extend(entries);
        self.persist()
    }
}
