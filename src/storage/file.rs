//! File-backed key-value store
//!
//! Keeps every entry in one JSON object on disk. The file is read once on
//! open and rewritten on every write, so values survive process restarts
//! the way browser storage survives page reloads.

use crate::storage::KeyValueStore;
use crate::utils::error::{IntoOverlayError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use log::debug;

/// JSON file store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            if data.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened storage {:?} with {} entries", path, entries.len());
        Ok(Self { path, entries })
    }

    /// Open the store at its default location in the user config directory
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path())
    }

    /// Default backing file
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("video-overlay");
        path.push("storage.json");
        path
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_disk(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).storage_err("Creating storage directory")?;
        }
        let data = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, data).storage_err("Writing storage file")
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save_to_disk()
    }
}
