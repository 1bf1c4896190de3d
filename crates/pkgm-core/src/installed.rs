//! Listing of installed packages

use std::path::PathBuf;

use pkgm_catalog::{CatalogEntry, read_package_metadata};
use pkgm_fs::{Layout, io};

use crate::Result;

/// A package present under `installed/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    /// Directory name, the package's identity
    pub pkg_name: String,
    pub path: PathBuf,
    /// The package's own descriptor entry; may differ from the catalog's
    pub metadata: Option<CatalogEntry>,
}

/// Installed packages sorted by name. A missing `installed/` is empty.
pub fn list_installed(layout: &Layout) -> Result<Vec<InstalledPackage>> {
    let mut packages = Vec::new();

    for pkg_name in io::list_dir_names(&layout.installed_dir())? {
        let path = layout.package_dir(&pkg_name);
        let metadata = match read_package_metadata(&path) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(pkg = %pkg_name, error = %e, "no readable package metadata");
                None
            }
        };
        packages.push(InstalledPackage {
            pkg_name,
            path,
            metadata,
        });
    }

    Ok(packages)
}
