//! Error types for pkgm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from pkgm-core
    #[error(transparent)]
    Core(#[from] pkgm_core::Error),

    /// Error from pkgm-catalog, such as an invalid search pattern
    #[error(transparent)]
    Catalog(#[from] pkgm_catalog::Error),

    /// Error from pkgm-fs
    #[error(transparent)]
    Fs(#[from] pkgm_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Some items of a batch failed; each was already reported
    #[error("{failed} of {total} item(s) failed")]
    ItemsFailed { failed: usize, total: usize },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// `Ok` when nothing failed, else [`CliError::ItemsFailed`].
    pub fn check_items(failed: usize, total: usize) -> Result<()> {
        if failed == 0 {
            Ok(())
        } else {
            Err(Self::ItemsFailed { failed, total })
        }
    }
}
