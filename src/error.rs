use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for pinsync operations
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("No line in {} matches '{pattern}' (value '{name}')", .path.display())]
    NoMatch {
        name: String,
        path: PathBuf,
        pattern: String,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pinsync
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SyncError::Config(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        SyncError::Template(msg.into())
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        SyncError::Pattern {
            pattern: pattern.into(),
            source,
        }
    }
}
