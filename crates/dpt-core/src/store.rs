//! Store: string-keyed persistence for history and watchlists.
//!
//! [`KeyValueStore`] is the whole persistence contract: synchronous `get` /
//! `set` / `remove` of string values under fixed keys. Callers serialize their
//! own state to JSON before handing it over.
//!
//! Two implementations ship with the crate:
//!
//! - [`MemoryStore`] keeps everything in process. Clones share the same map,
//!   so history and watchlists can be handed the same store.
//! - [`FileStore`] keeps every key in one JSON object on disk and rewrites
//!   the file on each mutation.

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// All keys live in a single JSON object: `{"key": "value", …}`.
///
/// The file and its parent directories are created on the first write. A
/// missing file reads as an empty store. A corrupt file is an error on read;
/// the next write moves it aside and starts over.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Like `read_all`, but a corrupt file is moved aside to
    /// `<name>.json.corrupt` and the write starts from an empty object.
    fn read_for_write(&self) -> Result<Map<String, Value>, StoreError> {
        match self.read_all() {
            Err(StoreError::Corrupt { source, .. }) => {
                let aside = self.path.with_extension("json.corrupt");
                tracing::error!(
                    path = %self.path.display(),
                    aside = %aside.display(),
                    error = %source,
                    "store: corrupt file moved aside, starting empty"
                );
                std::fs::rename(&self.path, &aside).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let body = serde_json::to_string_pretty(map).map_err(|source| StoreError::Serialize {
            key: String::new(),
            source,
        })?;
        // Write to a sibling and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.read_all()?;
        Ok(map.get(key).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_for_write()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        tracing::trace!(path = %self.path.display(), key, bytes = value.len(), "store: set");
        self.write_all(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_for_write()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
