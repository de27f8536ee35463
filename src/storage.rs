//! Key-value persistence adapter and snapshot codec.
//!
//! The database reads one snapshot per registry at startup and writes the full
//! registry back after every change. Anything that can hold a string under a
//! key can serve as the backing store.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::project::Project;
use crate::task::Task;

pub const PROJECTS_KEY: &str = "projects";
pub const TASKS_KEY: &str = "tasks";

/// Keys written by the first, browser-based version of the tracker.
pub const LEGACY_PROJECTS_KEY: &str = "progetti";
pub const LEGACY_TASKS_KEY: &str = "attività";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode {key} snapshot: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable string storage keyed by name.
pub trait KeyValueStore {
    /// Stored value for `key`, or `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if an earlier session had saved it.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory of JSON files, one per key (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        let mut buf = String::new();
        match File::open(&path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => Some(buf),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable snapshot, ignoring");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Write to a sibling temp file, then rename over the old snapshot.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: tmp.clone(),
            source,
        };
        let mut f = File::create(&tmp).map_err(io_err)?;
        f.write_all(value.as_bytes()).map_err(io_err)?;
        f.flush().map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }
}

fn encode<T: Serialize>(key: &str, items: &[T]) -> Result<String, StoreError> {
    serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Decode a snapshot, treating anything unparseable as an empty collection.
fn decode<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "malformed snapshot, starting with an empty collection");
            Vec::new()
        }
    }
}

pub fn encode_projects(projects: &[Project]) -> Result<String, StoreError> {
    encode(PROJECTS_KEY, projects)
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, StoreError> {
    encode(TASKS_KEY, tasks)
}

pub fn decode_projects(raw: Option<&str>) -> Vec<Project> {
    decode(PROJECTS_KEY, raw)
}

pub fn decode_tasks(raw: Option<&str>) -> Vec<Task> {
    decode(TASKS_KEY, raw)
}

/// Read a snapshot under `key`, falling back to `legacy` when absent.
pub(crate) fn load_with_fallback(store: &dyn KeyValueStore, key: &str, legacy: &str) -> Option<String> {
    store.load(key).or_else(|| store.load(legacy))
}
