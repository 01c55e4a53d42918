//! Export of extracted values to a downstream CI step.
//!
//! Values are appended as `key=value` lines to the file named by an
//! environment variable (`GITHUB_OUTPUT` on GitHub Actions). When that
//! variable is unset a local fallback file is used instead.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SyncError};

/// Where exported lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    /// False when the environment variable was unset and the fallback was used
    pub from_env: bool,
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub target: OutputTarget,
    pub lines: Vec<String>,
}

/// Picks the export file from an environment value or the fallback.
///
/// An empty variable counts as unset. The fallback is resolved against
/// `root`; the environment value is used as given.
pub fn resolve_target(env_value: Option<OsString>, fallback: &str, root: &Path) -> OutputTarget {
    match env_value {
        Some(value) if !value.is_empty() => OutputTarget {
            path: PathBuf::from(value),
            from_env: true,
        },
        _ => OutputTarget {
            path: root.join(fallback),
            from_env: false,
        },
    }
}

/// Reads `env_var` from the process environment and resolves the target.
pub fn resolve_target_from_env(env_var: &str, fallback: &str, root: &Path) -> OutputTarget {
    resolve_target(std::env::var_os(env_var), fallback, root)
}

/// Formats one output line, rejecting keys and values the line format
/// cannot carry.
pub fn format_line(key: &str, value: &str) -> Result<String> {
    if key.is_empty() || key.contains('=') || key.contains('\n') {
        return Err(SyncError::config(format!("invalid output key '{}'", key)));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(SyncError::template(format!(
            "output value for '{}' spans multiple lines",
            key
        )));
    }
    Ok(format!("{}={}", key, value))
}

/// Appends `key=value` lines to the target, creating the file if needed.
pub fn append_lines(target: &OutputTarget, entries: &[(String, String)]) -> Result<ExportReport> {
    let lines = entries
        .iter()
        .map(|(key, value)| format_line(key, value))
        .collect::<Result<Vec<_>>>()?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&target.path)
        .map_err(|e| SyncError::write(&target.path, e))?;

    for line in &lines {
        writeln!(file, "{}", line).map_err(|e| SyncError::write(&target.path, e))?;
    }

    debug!(path = %target.path.display(), lines = lines.len(), "output exported");
    Ok(ExportReport {
        target: target.clone(),
        lines,
    })
}
