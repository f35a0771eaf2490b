//! Internal key-value configuration kept next to the data files.
//!
//! Holds bookkeeping the record files themselves have no room for: schema
//! version markers (`"<kind>:version"`) and persisted id counters
//! (`"<kind>:next_id"`). One `key=value` pair per line, sorted by key.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BudgetError, Result};
use crate::fs::write_atomic;

#[derive(Debug, Default)]
pub struct InternalConfig {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl InternalConfig {
    /// An empty config that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`; a missing file yields an empty config bound to it.
    pub fn load(path: &Path) -> Result<Self> {
        let mut values = BTreeMap::new();
        match fs::read_to_string(path) {
            Ok(contents) => {
                for (index, line) in contents.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let (key, value) = line.split_once('=').ok_or_else(|| {
                        BudgetError::decode(path, index + 1, "expected key=value")
                    })?;
                    values.insert(key.to_string(), value.to_string());
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(BudgetError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    err
                )))
            }
        }
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
            dirty: false,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if self.values.get(&key) != Some(&value) {
            self.values.insert(key, value);
            self.dirty = true;
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the config if it changed since the last load or save.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = &self.path {
            let mut contents = String::new();
            for (key, value) in &self.values {
                contents.push_str(key);
                contents.push('=');
                contents.push_str(value);
                contents.push('\n');
            }
            write_atomic(path, contents.as_bytes()).map_err(|e| {
                BudgetError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            tracing::debug!(path = %path.display(), "saved internal config");
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let config = InternalConfig::load(&dir.path().join("config.data")).unwrap();
        assert!(config.get("recurring:version").is_none());
        assert!(!config.is_dirty());
    }

    #[test]
    fn test_set_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.data");

        let mut config = InternalConfig::load(&path).unwrap();
        config.set("recurring:version", "1");
        config.set("wish:version", "2");
        assert!(config.is_dirty());
        config.save().unwrap();
        assert!(!config.is_dirty());

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "recurring:version=1\nwish:version=2\n"
        );
        let reloaded = InternalConfig::load(&path).unwrap();
        assert_eq!(reloaded.get("wish:version"), Some("2"));
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut config = InternalConfig::in_memory();
        config.set("k", "v");
        config.save().unwrap();
        config.set("k", "v");
        assert!(!config.is_dirty());
        assert!(config.remove("missing").is_none());
        assert!(!config.is_dirty());
    }

    #[test]
    fn test_malformed_line_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.data");
        fs::write(&path, "good=1\nbroken\n").unwrap();
        let err = InternalConfig::load(&path).unwrap_err();
        assert!(matches!(err, BudgetError::Decode { line: 2, .. }));
    }
}
