//! Error types for pkgm-git

use std::path::PathBuf;
use std::time::Duration;

/// Result type for pkgm-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures to run the VCS binary. A command that ran and exited non-zero
/// is not an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("VCS binary not found or not executable: {path}")]
    BinaryNotFound { path: PathBuf },

    #[error("Working directory does not exist: {path}")]
    WorkDirMissing { path: PathBuf },

    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' timed out after {}s", .after.as_secs_f64())]
    TimedOut { command: String, after: Duration },

    #[error("I/O error capturing VCS output: {0}")]
    Io(#[from] std::io::Error),
}
