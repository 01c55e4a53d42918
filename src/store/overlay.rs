use std::collections::BTreeMap;
use std::io::{BufRead, Cursor};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::TextStore;
use crate::error::Result;

/// Buffers writes on top of another store.
///
/// Reads see buffered content first and fall through to the inner store
/// otherwise. The inner store is never written, which is what `--dry-run`
/// and `--check` rely on.
#[derive(Debug)]
pub struct OverlayStore<S> {
    inner: S,
    pending: BTreeMap<PathBuf, String>,
}

impl<S: TextStore> OverlayStore<S> {
    pub fn new(inner: S) -> Self {
        OverlayStore {
            inner,
            pending: BTreeMap::new(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Buffered writes, keyed by path.
    pub fn pending(&self) -> &BTreeMap<PathBuf, String> {
        &self.pending
    }

    /// Paths whose buffered content differs from the inner store.
    pub fn changed_paths(&self) -> Result<Vec<PathBuf>> {
        let mut changed = Vec::new();
        for (path, contents) in &self.pending {
            if self.inner.read_to_string(path)? != *contents {
                changed.push(path.clone());
            }
        }
        Ok(changed)
    }
}

impl<S: TextStore> TextStore for OverlayStore<S> {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        match self.pending.get(path) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.as_bytes()))),
            None => self.inner.open(path),
        }
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.pending.get(path) {
            Some(contents) => Ok(contents.clone()),
            None => self.inner.read_to_string(path),
        }
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        debug!(path = %path.display(), bytes = contents.len(), "buffering write");
        self.pending.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
