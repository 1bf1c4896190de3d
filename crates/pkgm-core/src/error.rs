//! Error types for pkgm-core

use std::path::PathBuf;

use crate::host::HostError;

/// Result type for pkgm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in package operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A VCS command ran but exited non-zero
    #[error("{operation} failed (exit code {exit_code}):\n{output}")]
    Vcs {
        operation: String,
        exit_code: i32,
        output: String,
    },

    /// The VCS command could not be run or was killed at its deadline
    #[error(transparent)]
    VcsAdapter(#[from] pkgm_git::Error),

    /// No mirror of the catalog source has been synchronized yet
    #[error("Repository \"{repo}\" not found. Try running \"pkgm update\"")]
    CatalogUnavailable { repo: String },

    /// Descriptor missing or malformed, or an invalid search pattern
    #[error(transparent)]
    Catalog(#[from] pkgm_catalog::Error),

    /// No installed package matches the requested name
    #[error("Unable to find plugin: {name}")]
    NotFound { name: String },

    #[error("'{name}' is not installed")]
    NotInstalled { name: String },

    #[error("'{name}' is already installed at {path}")]
    AlreadyInstalled { name: String, path: PathBuf },

    /// Identifier is neither a catalog package nor a usable URL; `reason`
    /// is kept for logs
    #[error("Invalid plugin or url: {identifier}")]
    InvalidPackage { identifier: String, reason: String },

    /// A host collaborator rejected a call
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Filesystem error from pkgm-fs
    #[error(transparent)]
    Fs(#[from] pkgm_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    VcsFailure,
    CatalogUnavailable,
    ParseFailure,
    NotFound,
    InvalidInput,
    /// Local filesystem or collaborator fault
    System,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Vcs { .. } | Self::VcsAdapter(_) => ErrorKind::VcsFailure,
            Self::CatalogUnavailable { .. } => ErrorKind::CatalogUnavailable,
            Self::Catalog(pkgm_catalog::Error::InvalidPattern { .. }) => ErrorKind::InvalidInput,
            Self::Catalog(pkgm_catalog::Error::Fs(_)) => ErrorKind::System,
            Self::Catalog(_) => ErrorKind::ParseFailure,
            Self::NotFound { .. } | Self::NotInstalled { .. } => ErrorKind::NotFound,
            Self::InvalidPackage { .. } | Self::AlreadyInstalled { .. } => ErrorKind::InvalidInput,
            Self::Fs(pkgm_fs::Error::InvalidName { .. }) => ErrorKind::InvalidInput,
            Self::Host(_) | Self::Fs(_) | Self::Io(_) => ErrorKind::System,
        }
    }

    /// Build a [`Error::Vcs`] from a failed command's output.
    pub fn vcs(operation: impl Into<String>, output: pkgm_git::VcsOutput) -> Self {
        Self::Vcs {
            operation: operation.into(),
            exit_code: output.exit_code,
            output: output.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = Error::vcs(
            "git pull",
            pkgm_git::VcsOutput {
                exit_code: 1,
                output: "fatal: not a git repository".to_string(),
            },
        );
        assert_eq!(err.kind(), ErrorKind::VcsFailure);
        assert!(err.to_string().contains("fatal: not a git repository"));

        let err = Error::NotInstalled {
            name: "weather".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = Error::Catalog(pkgm_catalog::Error::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
