//! On-disk layout of the package-manager base directory
//!
//! ```text
//! <base>/
//!   repos/<repo>/repo.json
//!   installed/<pkg>/
//!   trash/<pkg>.<uuid>/
//!   locks/
//!   options.toml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, PkgPath, Result};

/// Path resolution rooted at a package-manager base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `base`. Nothing is touched on disk.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn repos_dir(&self) -> PathBuf {
        self.base.join(PkgPath::Repos)
    }

    /// Mirror checkout for the catalog source `repo`.
    pub fn mirror_dir(&self, repo: &str) -> PathBuf {
        self.repos_dir().join(repo)
    }

    pub fn installed_dir(&self) -> PathBuf {
        self.base.join(PkgPath::Installed)
    }

    /// Install directory for `pkg_name`.
    pub fn package_dir(&self, pkg_name: &str) -> PathBuf {
        self.installed_dir().join(pkg_name)
    }

    pub fn trash_dir(&self) -> PathBuf {
        self.base.join(PkgPath::Trash)
    }

    pub fn locks_dir(&self) -> PathBuf {
        self.base.join(PkgPath::Locks)
    }

    pub fn options_path(&self) -> PathBuf {
        self.base.join(PkgPath::Options)
    }

    /// Metadata descriptor at the root of a checkout.
    ///
    /// Mirrors and installed packages share this location.
    pub fn descriptor_path(checkout: &Path) -> PathBuf {
        checkout.join(PkgPath::Descriptor)
    }

    /// Dependency requirements file at the root of a checkout.
    pub fn requirements_path(checkout: &Path) -> PathBuf {
        checkout.join(PkgPath::Requirements)
    }

    /// Create every directory of the layout that does not exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.repos_dir(),
            self.installed_dir(),
            self.trash_dir(),
            self.locks_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        }
        tracing::debug!(base = %self.base.display(), "layout directories ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_rooted_at_base() {
        let layout = Layout::new("/tmp/pkgs");
        assert_eq!(layout.mirror_dir("main"), PathBuf::from("/tmp/pkgs/repos/main"));
        assert_eq!(
            layout.package_dir("weather"),
            PathBuf::from("/tmp/pkgs/installed/weather")
        );
        assert_eq!(layout.trash_dir(), PathBuf::from("/tmp/pkgs/trash"));
        assert_eq!(layout.options_path(), PathBuf::from("/tmp/pkgs/options.toml"));
    }

    #[test]
    fn test_descriptor_path_is_checkout_root() {
        let checkout = Path::new("/tmp/pkgs/installed/weather");
        assert_eq!(
            Layout::descriptor_path(checkout),
            PathBuf::from("/tmp/pkgs/installed/weather/repo.json")
        );
    }
}
