use std::path::Path;

use regex::NoExpand;
use tracing::debug;

use crate::domain::SubstitutionPattern;
use crate::error::Result;
use crate::store::TextStore;

/// Outcome of a global substitution on one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    /// Number of non-overlapping matches replaced
    pub matches: usize,
    /// Whether the resulting content differs from the original
    pub changed: bool,
}

/// Replaces every match of `pattern` in `content` with `replacement`.
///
/// The replacement is inserted literally; `$` has no special meaning.
pub fn substitute(content: &str, pattern: &SubstitutionPattern, replacement: &str) -> (String, usize) {
    let matches = pattern.regex().find_iter(content).count();
    if matches == 0 {
        return (content.to_string(), 0);
    }
    let replaced = pattern.regex().replace_all(content, NoExpand(replacement));
    (replaced.into_owned(), matches)
}

/// Reads the whole file, replaces every match, and writes the result back
/// over the same path.
///
/// The file is written even when nothing matched.
pub fn replace_in_file<S: TextStore + ?Sized>(
    store: &mut S,
    path: &Path,
    pattern: &SubstitutionPattern,
    replacement: &str,
) -> Result<Substitution> {
    let original = store.read_to_string(path)?;
    let (updated, matches) = substitute(&original, pattern, replacement);
    let changed = updated != original;

    store.write(path, &updated)?;

    debug!(
        path = %path.display(),
        pattern = pattern.as_str(),
        matches,
        changed,
        "substitution applied"
    );
    Ok(Substitution { matches, changed })
}
