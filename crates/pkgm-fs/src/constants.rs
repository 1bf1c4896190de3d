//! Well-known names inside the package-manager base directory.

use std::path::Path;

/// Fixed directory and file names used by the on-disk layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkgPath {
    /// `repos/`, one mirror checkout per catalog source
    Repos,
    /// `installed/`, one checkout per installed package
    Installed,
    /// `trash/`, uninstalled packages preserved under unique names
    Trash,
    /// `locks/`, advisory lock files
    Locks,
    /// `options.toml`
    Options,
    /// `repo.json`, the metadata descriptor at a checkout root
    Descriptor,
    /// `requirements.txt`, dependency requirements of a package
    Requirements,
}

impl PkgPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repos => "repos",
            Self::Installed => "installed",
            Self::Trash => "trash",
            Self::Locks => "locks",
            Self::Options => "options.toml",
            Self::Descriptor => "repo.json",
            Self::Requirements => "requirements.txt",
        }
    }
}

impl AsRef<Path> for PkgPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for PkgPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for PkgPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
