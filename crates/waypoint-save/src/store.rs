//! Backing stores for the serialized save document.
//!
//! A store holds a single JSON document under a fixed key. [`FileStore`]
//! keeps it on disk; [`MemoryStore`] keeps it in a shared in-process slot,
//! which tests read back to inspect what was written.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::SaveError;

/// Key the save document is stored under.
pub const SAVE_LOCATION: &str = "incrementalGameSave";

/// Somewhere a save document can be kept.
pub trait SaveStore {
    /// Read the stored document, or `None` if nothing was saved yet.
    fn read(&self) -> Result<Option<String>, SaveError>;

    /// Replace the stored document.
    fn write(&mut self, document: &str) -> Result<(), SaveError>;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the document as `incrementalGameSave.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{SAVE_LOCATION}.json")))
    }

    /// Where the document lives.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename so a crash never leaves a
        // truncated save behind.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, document)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), bytes = document.len(), "Save written");
        Ok(())
    }
}

/// An in-process slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a document.
    pub fn with_document(document: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(document.to_owned()))),
        }
    }

    /// The current document, if any.
    pub fn document(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.document())
    }

    fn write(&mut self, document: &str) -> Result<(), SaveError> {
        self.slot.replace(Some(document.to_owned()));
        Ok(())
    }
}
