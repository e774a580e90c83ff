//! Persistence of the document snapshot in a host key/value store

mod autosave;

pub use autosave::Autosave;

use crate::document::Document;
use crate::{Error, Result};
use log::{debug, info, warn};
use rustc_hash::FxHashMap;

/// Key the snapshot is stored under
pub const STORAGE_KEY: &str = "pp-resume-v1";

/// Suggested file name for exports
pub const EXPORT_FILE_NAME: &str = "resume-data.json";

/// A string key/value store, e.g. browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and native hosts
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
    writes: usize,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Reject every write, like a full or disabled browser store
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Storage(format!("store is read-only, cannot write {key}")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Load the saved document, falling back to the default
///
/// A missing entry is normal on first use. A corrupt one is logged and
/// ignored; it is overwritten by the next save.
pub fn load_document<S>(store: &S, key: &str) -> Document
where
    S: KeyValueStore + ?Sized,
{
    let Some(text) = store.get(key) else {
        debug!("no saved resume under {key}");
        return Document::new();
    };

    match Document::from_json(&text) {
        Ok(document) => {
            debug!("loaded resume from {key} ({} bytes)", text.len());
            document
        }
        Err(err) => {
            warn!("ignoring saved resume under {key}: {err}");
            Document::new()
        }
    }
}

/// Write the document snapshot
pub fn save_document<S>(store: &mut S, key: &str, document: &Document) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let text = document.to_json()?;
    store.set(key, &text)?;
    info!("saved resume to {key} ({} bytes)", text.len());
    Ok(())
}
