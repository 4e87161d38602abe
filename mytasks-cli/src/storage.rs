//! JSON file key-value store
//!
//! The whole store is one JSON object mapping keys to string values, read
//! once on open and rewritten in full on every write.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use mytasks_core::{CoreError, KeyValueStore};

/// File-backed [`KeyValueStore`]
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// copied aside to `<name>.bak` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(contents) => parse_items(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt store file, starting empty");
                backup(&path);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no store file yet");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read store file, starting empty");
                BTreeMap::new()
            }
        };

        Self { path, items }
    }

    /// Get the storage path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(items)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> mytasks_core::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> mytasks_core::Result<()> {
        let mut items = self.items.clone();
        items.insert(key.to_string(), value.to_string());
        self.flush(&items).map_err(|e| {
            CoreError::storage_with_source(format!("Failed to write {}", self.path.display()), e)
        })?;
        self.items = items;
        Ok(())
    }
}

/// Parse the store object. Non-string values are kept as their JSON text,
/// so a hand-edited file with an inline array still loads.
fn parse_items(contents: &str) -> serde_json::Result<BTreeMap<String, String>> {
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let raw: BTreeMap<String, Value> = serde_json::from_str(contents)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

fn backup(path: &Path) {
    let backup_path = path.with_extension("json.bak");
    if let Err(e) = fs::copy(path, &backup_path) {
        warn!(path = %backup_path.display(), error = %e, "failed to back up corrupt store");
    }
}
