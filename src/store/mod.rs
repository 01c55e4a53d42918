//! File access abstraction layer
//!
//! Extraction and substitution go through the [TextStore] trait so the same
//! pipeline can run against real files, against a buffered overlay that
//! never touches disk, or against purely in-memory content in tests.
//!
//! - [fs::FsStore]: real files resolved against a root directory
//! - [overlay::OverlayStore]: buffers writes on top of another store
//! - [memory::MemoryStore]: in-memory files for testing

pub mod fs;
pub mod memory;
pub mod overlay;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use overlay::OverlayStore;

use std::io::BufRead;
use std::path::Path;

use crate::error::Result;

/// Text file access used by the pipeline.
///
/// Paths are passed exactly as they appear in the configuration; each
/// implementation decides how to resolve them. Errors name that path.
pub trait TextStore {
    /// Opens a file for line-by-line reading.
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>>;

    /// Reads the whole file as one string.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replaces the whole content of a file.
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}
