use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::domain::{Extraction, LinePattern};
use crate::error::{Result, SyncError};
use crate::store::TextStore;

/// Scans `path` line by line and returns the capture group of the first
/// line the pattern matches at its start.
///
/// Reading stops at the first match. A missing or unreadable file is an
/// error; a file with no matching line is [Extraction::NotFound].
pub fn extract<S: TextStore + ?Sized>(
    store: &S,
    path: &Path,
    pattern: &LinePattern,
) -> Result<Extraction> {
    let reader = store.open(path)?;
    let extraction = extract_from_reader(reader, pattern).map_err(|e| SyncError::read(path, e))?;

    debug!(
        path = %path.display(),
        pattern = pattern.as_str(),
        found = extraction.is_found(),
        "extraction finished"
    );
    Ok(extraction)
}

/// Line scan over any buffered reader.
///
/// Line terminators are not part of the line passed to the pattern.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    pattern: &LinePattern,
) -> std::io::Result<Extraction> {
    for line in reader.lines() {
        let line = line?;
        if let Some(value) = pattern.capture(&line) {
            return Ok(Extraction::Found(value.to_string()));
        }
    }
    Ok(Extraction::NotFound)
}
