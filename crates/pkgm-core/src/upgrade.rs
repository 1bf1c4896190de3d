//! Package upgrades (pull into an installed checkout)

use pkgm_fs::{Layout, LockScope, NameLock, io, validate_pkg_name};
use pkgm_git::{Vcs, VcsOutput};

use crate::{Error, Report, Result};

pub struct Upgrader<'a> {
    layout: &'a Layout,
    vcs: &'a dyn Vcs,
}

impl<'a> Upgrader<'a> {
    pub fn new(layout: &'a Layout, vcs: &'a dyn Vcs) -> Self {
        Self { layout, vcs }
    }

    /// Pull updates into `installed/<pkg_name>`.
    ///
    /// The pull output is returned as-is, including a non-zero exit code.
    pub fn upgrade_one(&self, pkg_name: &str) -> Result<VcsOutput> {
        if validate_pkg_name(pkg_name).is_err() {
            return Err(Error::NotInstalled {
                name: pkg_name.to_string(),
            });
        }

        let _lock = NameLock::acquire(self.layout, LockScope::Package, pkg_name)?;

        let dir = self.layout.package_dir(pkg_name);
        if !dir.is_dir() {
            return Err(Error::NotInstalled {
                name: pkg_name.to_string(),
            });
        }

        let output = self.vcs.pull(&dir)?;
        tracing::info!(pkg = %pkg_name, exit_code = output.exit_code, "package pulled");
        Ok(output)
    }

    /// Upgrade every installed package, in name order, best effort.
    pub fn upgrade_all(&self) -> Result<Report<VcsOutput>> {
        let mut report = Report::new();
        for pkg_name in io::list_dir_names(&self.layout.installed_dir())? {
            let result = self.upgrade_one(&pkg_name);
            report.push(pkg_name, result);
        }
        Ok(report)
    }
}
