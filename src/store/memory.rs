use std::collections::BTreeMap;
use std::io::{self, BufRead, Cursor};
use std::path::{Path, PathBuf};

use super::TextStore;
use crate::error::{Result, SyncError};

/// In-memory store for testing without touching disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style variant of [MemoryStore::insert]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    fn lookup(&self, path: &Path) -> Result<&String> {
        self.files.get(path).ok_or_else(|| {
            SyncError::read(
                path,
                io::Error::new(io::ErrorKind::NotFound, "No such file in memory store"),
            )
        })
    }
}

impl TextStore for MemoryStore {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        let contents = self.lookup(path)?;
        Ok(Box::new(Cursor::new(contents.as_bytes())))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.lookup(path).cloned()
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
