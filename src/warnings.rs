use std::fmt;
use std::path::PathBuf;

/// Non-fatal issues found during a sync.
/// These are reported to the operator but never fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    /// A target file contained no occurrence of the substitution pattern
    NoMatchesInTarget { path: PathBuf, pattern: String },
    /// The export environment variable was unset, so the fallback file was used
    OutputFallback { env_var: String, path: PathBuf },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::NoMatchesInTarget { path, pattern } => {
                write!(
                    f,
                    "No occurrence of '{}' in {}; file left as is",
                    pattern,
                    path.display()
                )
            }
            SyncWarning::OutputFallback { env_var, path } => {
                write!(
                    f,
                    "{} is not set; writing output to {}",
                    env_var,
                    path.display()
                )
            }
        }
    }
}
