//! Durable storage of the chosen locale

use crate::error::{I18nError, I18nResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Client-side key/value storage for preferences.
///
/// Implementations may fail at any time (private browsing, quota, missing
/// permissions); callers treat every failure as non-fatal.
pub trait PreferenceStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn load(&self, key: &str) -> I18nResult<Option<String>>;

    /// Write a value
    fn store(&mut self, key: &str, value: &str) -> I18nResult<()>;
}

/// Session-only storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a value already stored
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> I18nResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> I18nResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// The file is created on first write
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> I18nResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            I18nError::storage(format!("corrupt preference file {:?}: {}", self.path, e))
        })
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> I18nResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn store(&mut self, key: &str, value: &str) -> I18nResult<()> {
        let mut values = self.read_all().unwrap_or_else(|e| {
            warn!("Discarding unreadable preferences: {}", e);
            HashMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        let serialized = serde_json::to_string_pretty(&values)
            .map_err(|e| I18nError::storage(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serialized)?;
        debug!("Stored preference '{}' in {:?}", key, self.path);
        Ok(())
    }
}
