use std::path::PathBuf;

/// Errors that can occur reading or querying a catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No descriptor at the expected path.
    #[error("metadata descriptor not found: {0}")]
    DescriptorNotFound(PathBuf),

    /// Descriptor exists but is not a valid package list.
    #[error("failed to parse metadata descriptor at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Descriptor parsed but lists no packages.
    #[error("metadata descriptor at {0} lists no packages")]
    NoPackages(PathBuf),

    /// Search pattern is not a valid regular expression.
    #[error("invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Failed to parse descriptor JSON from memory.
    #[error("failed to parse metadata descriptor: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading the descriptor.
    #[error(transparent)]
    Fs(#[from] pkgm_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
