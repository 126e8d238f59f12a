//! Preference Store
//!
//! String-keyed JSON values persisted in a single file
//! (~/.bible-crentech/preferences.json). Used for history and other UI state.
//!
//! Reads never fail: a missing key, an unreadable file or a value of the wrong
//! shape all yield the caller's default. Writes are logged and skipped on
//! failure. `flush` is the only call that reports I/O errors.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::error::AppResult;
use crate::utils::paths::ensure_dir;

/// File-backed key-value store
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl PreferenceStore {
    /// Open the store at `path`, starting empty when the file is missing or
    /// unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read_file(&path).unwrap_or_else(|e| {
            tracing::warn!(
                "[PreferenceStore] Ignoring unreadable store {}: {}",
                path.display(),
                e
            );
            Map::new()
        });
        Self { path, values }
    }

    fn read_file(path: &Path) -> AppResult<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(path)?;
        let content = content.trim_start_matches('\u{feff}');
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Value stored under `key`, or `default`
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.values.get(key) else {
            return default;
        };
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("[PreferenceStore] Failed to load key \"{}\": {}", key, e);
                default
            }
        }
    }

    /// Store `value` under `key` and persist
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.values.insert(key.to_string(), value);
                self.flush_or_warn(key);
            }
            Err(e) => tracing::warn!("[PreferenceStore] Failed to save key \"{}\": {}", key, e),
        }
    }

    /// Remove `key` and persist
    pub fn clear(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush_or_warn(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole store to disk
    pub fn flush(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn flush_or_warn(&self, key: &str) {
        if let Err(e) = self.flush() {
            tracing::warn!("[PreferenceStore] Failed to persist key \"{}\": {}", key, e);
        }
    }
}
