//! Read-through document cache.
//!
//! Documents are JSON mappings keyed by file path and invalidated when the
//! file's modification time changes. A document that cannot be read or
//! parsed, or whose top level is not a mapping, is treated as empty: a
//! broken hierarchy level must not take down an entire lookup.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::SystemTime,
};

use serde_json::{Map, Value};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct FileCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    document: Map<String, Value>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a document through the cache.
    ///
    /// The lock guards only the entry map; file I/O happens outside it.
    pub fn read(&self, path: &Path) -> Map<String, Value> {
        let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok();

        if let Some(modified) = modified
            && let Some(entry) = self
                .entries
                .lock()
                .expect("document cache lock poisoned")
                .get(path)
            && entry.modified == modified
        {
            return entry.document.clone();
        }

        debug!(path = %path.display(), "loading document");
        let document = load_document(path);

        if let Some(modified) = modified {
            self.entries
                .lock()
                .expect("document cache lock poisoned")
                .insert(
                    path.to_path_buf(),
                    CacheEntry {
                        modified,
                        document: document.clone(),
                    },
                );
        }

        document
    }
}

fn load_document(path: &Path) -> Map<String, Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read document; treating as empty");
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(
                path = %path.display(),
                found = crate::core::types::type_name(&other),
                "document is not a mapping; treating as empty"
            );
            Map::new()
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to parse document; treating as empty");
            Map::new()
        }
    }
}
