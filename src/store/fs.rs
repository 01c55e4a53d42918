use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::TextStore;
use crate::error::{Result, SyncError};

/// Real filesystem access rooted at a directory.
///
/// Relative paths are joined onto the root; absolute paths are used as-is.
/// Writes overwrite in place with no backup and no atomic rename.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStore { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl TextStore for FsStore {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        let full = self.resolve(path);
        debug!(path = %full.display(), "opening for line scan");
        let file = File::open(&full).map_err(|e| SyncError::read(path, e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        debug!(path = %full.display(), "reading");
        fs::read_to_string(&full).map_err(|e| SyncError::read(path, e))
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        let full = self.resolve(path);
        debug!(path = %full.display(), bytes = contents.len(), "writing");
        fs::write(&full, contents).map_err(|e| SyncError::write(path, e))
    }
}
