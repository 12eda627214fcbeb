//! Durable key-value save store.
//!
//! One JSON document on disk, written through on every `put`. Values are
//! opaque JSON; the store does not interpret them. A missing or unreadable
//! file yields an empty store (starting fresh is not an error), but a failed
//! write is reported to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveDocument {
    entries: serde_json::Map<String, Value>,
}

pub struct SaveStore {
    path: PathBuf,
    document: SaveDocument,
}

impl SaveStore {
    /// Open the store at `path`, loading any existing document. A corrupt
    /// document is discarded with a warning rather than failing startup.
    pub fn open(path: &Path) -> Self {
        let document = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(doc) => doc,
                Err(e) => {
                    log::warn!(
                        "Save file {} is corrupt ({e}); starting with an empty store",
                        path.display()
                    );
                    SaveDocument::default()
                }
            },
            Err(_) => SaveDocument::default(),
        };
        Self {
            path: path.to_path_buf(),
            document,
        }
    }

    pub fn put(&mut self, key: &str, value: Value) -> Result<(), String> {
        self.document.entries.insert(key.to_string(), value);
        let raw = serde_json::to_string_pretty(&self.document)
            .map_err(|e| format!("Failed to serialize save document: {e}"))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    format!("Failed to create save directory {}: {e}", parent.display())
                })?;
            }
        }
        fs::write(&self.path, raw)
            .map_err(|e| format!("Failed to write save file {}: {e}", self.path.display()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.entries.get(key)
    }
}
