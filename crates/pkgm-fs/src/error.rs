//! Error types for pkgm-fs

use std::path::PathBuf;

/// Result type for pkgm-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pkgm-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse options at {path}: {message}")]
    OptionsParse { path: PathBuf, message: String },

    #[error("Failed to serialize options for {path}: {message}")]
    OptionsSerialize { path: PathBuf, message: String },

    #[error("Invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Invalid package name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
