//! Package manager facade
//!
//! Owns the layout, options, VCS adapter, and host collaborators, and hands
//! borrowed views of them to the per-operation components. The catalog is
//! never stored here: it is returned by [`PackageManager::refresh`] or
//! [`PackageManager::load_catalog`] and passed back in by the caller.

use pkgm_catalog::Catalog;
use pkgm_fs::{Layout, Options};
use pkgm_git::{GitCli, Vcs, VcsOutput};

use crate::host::{DependencyInstaller, PluginHost};
use crate::install::{InstallSummary, Installer};
use crate::installed::{InstalledPackage, list_installed};
use crate::mirror::{Mirror, Refresh};
use crate::trash::TrashEntry;
use crate::uninstall::Uninstaller;
use crate::upgrade::Upgrader;
use crate::{Report, Result};

pub struct PackageManager {
    layout: Layout,
    options: Options,
    vcs: Box<dyn Vcs>,
    host: Box<dyn PluginHost>,
    deps: Box<dyn DependencyInstaller>,
}

impl PackageManager {
    /// Create a manager and make sure the layout directories exist.
    pub fn open(
        layout: Layout,
        options: Options,
        vcs: Box<dyn Vcs>,
        host: Box<dyn PluginHost>,
        deps: Box<dyn DependencyInstaller>,
    ) -> Result<Self> {
        layout.ensure_dirs()?;
        Ok(Self {
            layout,
            options,
            vcs,
            host,
            deps,
        })
    }

    /// Create a manager driving the git binary named in `options`.
    pub fn with_git(
        layout: Layout,
        options: Options,
        host: Box<dyn PluginHost>,
        deps: Box<dyn DependencyInstaller>,
    ) -> Result<Self> {
        let vcs = GitCli::new(&options.git_bin).with_timeout(options.vcs_timeout());
        Self::open(layout, options, Box::new(vcs), host, deps)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mirror(&self) -> Mirror<'_> {
        Mirror::new(&self.layout, self.vcs.as_ref())
    }

    /// Sync the central mirror and parse its catalog.
    pub fn refresh(&self) -> Result<Refresh> {
        self.mirror().refresh(
            &self.options.central_repo_name,
            &self.options.central_repo_url,
        )
    }

    /// Parse the central mirror's catalog without syncing it.
    pub fn load_catalog(&self) -> Result<Catalog> {
        self.mirror().load_catalog(&self.options.central_repo_name)
    }

    pub fn installer(&self) -> Installer<'_> {
        Installer::new(
            &self.layout,
            self.vcs.as_ref(),
            self.host.as_ref(),
            self.deps.as_ref(),
            &self.options.central_repo_name,
        )
    }

    pub fn install<S: AsRef<str>>(
        &self,
        catalog: Option<&Catalog>,
        identifiers: &[S],
    ) -> Report<InstallSummary> {
        self.installer().install(catalog, identifiers)
    }

    pub fn upgrade_one(&self, pkg_name: &str) -> Result<VcsOutput> {
        Upgrader::new(&self.layout, self.vcs.as_ref()).upgrade_one(pkg_name)
    }

    pub fn upgrade_all(&self) -> Result<Report<VcsOutput>> {
        Upgrader::new(&self.layout, self.vcs.as_ref()).upgrade_all()
    }

    pub fn uninstall<S: AsRef<str>>(&self, names: &[S]) -> Report<Vec<TrashEntry>> {
        Uninstaller::new(&self.layout).uninstall(names)
    }

    pub fn list_installed(&self) -> Result<Vec<InstalledPackage>> {
        list_installed(&self.layout)
    }
}
