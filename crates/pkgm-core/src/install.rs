//! Package installation
//!
//! An identifier is either an `http`/`https` URL, cloned directly, or a
//! `pkg_name` looked up in the catalog. Each identifier of a batch is
//! installed independently. Post-clone hooks (dependency install, plugin
//! reload, default activation) never undo the clone when they fail; their
//! failures are kept as warnings on the summary.

use std::fs;
use std::path::{Path, PathBuf};

use pkgm_catalog::Catalog;
use pkgm_fs::{Error as FsError, Layout, LockScope, NameLock, validate_pkg_name};
use pkgm_git::{CloneOptions, Vcs, VcsOutput};
use url::Url;
use uuid::Uuid;

use crate::host::{DependencyInstaller, PluginHost};
use crate::mirror::discard_staging;
use crate::{Error, Report, Result};

/// Where an identifier installs from and under which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub pkg_name: String,
    pub source_url: String,
    /// Plugins to activate once installed
    pub default_enable: Vec<String>,
}

/// What a successful install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSummary {
    pub pkg_name: String,
    pub path: PathBuf,
    pub clone_output: String,
    /// Whether a requirements file was found and installed
    pub dependencies_installed: bool,
    /// Plugins activated by name after the reload
    pub activated: Vec<String>,
    /// Post-clone hook failures
    pub warnings: Vec<String>,
}

/// Derive a package name from the last path segment of a URL.
///
/// `https://host/org/weather.git/` becomes `weather`. Returns `None` when
/// no usable segment exists.
pub fn pkg_name_from_url(url: &Url) -> Option<String> {
    let segment = url
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);

    validate_pkg_name(name).ok()?;
    Some(name.to_string())
}

/// Resolve one install identifier against an optional catalog.
///
/// `repo` names the catalog source, for the error raised when a catalog
/// lookup is needed but no catalog is loaded.
pub fn resolve(identifier: &str, catalog: Option<&Catalog>, repo: &str) -> Result<ResolvedPackage> {
    if let Ok(url) = Url::parse(identifier)
        && matches!(url.scheme(), "http" | "https")
    {
        let pkg_name = pkg_name_from_url(&url).ok_or_else(|| Error::InvalidPackage {
            identifier: identifier.to_string(),
            reason: "cannot derive a package name from the URL".to_string(),
        })?;

        // A URL that is also a catalog source keeps its activation list
        let default_enable = catalog
            .and_then(|c| c.iter().find(|entry| entry.repo == identifier))
            .map(|entry| entry.default_enable.clone())
            .unwrap_or_default();

        return Ok(ResolvedPackage {
            pkg_name,
            source_url: identifier.to_string(),
            default_enable,
        });
    }

    let catalog = catalog.ok_or_else(|| Error::CatalogUnavailable {
        repo: repo.to_string(),
    })?;

    let entry = catalog
        .lookup(identifier)
        .ok_or_else(|| Error::InvalidPackage {
            identifier: identifier.to_string(),
            reason: "no such package in the catalog".to_string(),
        })?;

    validate_pkg_name(&entry.pkg_name).map_err(|e| Error::InvalidPackage {
        identifier: identifier.to_string(),
        reason: e.to_string(),
    })?;

    Ok(ResolvedPackage {
        pkg_name: entry.pkg_name.clone(),
        source_url: entry.repo.clone(),
        default_enable: entry.default_enable.clone(),
    })
}

/// Installs packages into the layout's `installed/` directory.
pub struct Installer<'a> {
    layout: &'a Layout,
    vcs: &'a dyn Vcs,
    host: &'a dyn PluginHost,
    deps: &'a dyn DependencyInstaller,
    repo: &'a str,
}

impl<'a> Installer<'a> {
    pub fn new(
        layout: &'a Layout,
        vcs: &'a dyn Vcs,
        host: &'a dyn PluginHost,
        deps: &'a dyn DependencyInstaller,
        repo: &'a str,
    ) -> Self {
        Self {
            layout,
            vcs,
            host,
            deps,
            repo,
        }
    }

    /// Install every identifier, each independently of the others.
    pub fn install<S: AsRef<str>>(
        &self,
        catalog: Option<&Catalog>,
        identifiers: &[S],
    ) -> Report<InstallSummary> {
        let mut report = Report::new();
        for identifier in identifiers {
            let identifier = identifier.as_ref();
            let result = self.install_one(catalog, identifier);
            match &result {
                Err(Error::InvalidPackage { reason, .. }) => {
                    tracing::warn!(identifier = %identifier, reason = %reason, "cannot resolve package");
                }
                Err(e) => tracing::warn!(identifier = %identifier, error = %e, "install failed"),
                Ok(_) => {}
            }
            report.push(identifier, result);
        }
        report
    }

    /// Install a single identifier.
    pub fn install_one(&self, catalog: Option<&Catalog>, identifier: &str) -> Result<InstallSummary> {
        let resolved = resolve(identifier, catalog, self.repo)?;
        let pkg_name = resolved.pkg_name.as_str();

        let _lock = NameLock::acquire(self.layout, LockScope::Package, pkg_name)?;

        let dest = self.layout.package_dir(pkg_name);
        if dest.exists() {
            return Err(Error::AlreadyInstalled {
                name: pkg_name.to_string(),
                path: dest,
            });
        }

        let output = self.clone_staged(&resolved, &dest)?;

        let mut summary = InstallSummary {
            pkg_name: pkg_name.to_string(),
            path: dest,
            clone_output: output.output,
            dependencies_installed: false,
            activated: Vec::new(),
            warnings: Vec::new(),
        };

        self.run_hooks(&resolved, &mut summary);

        tracing::info!(pkg = %pkg_name, "package installed");
        Ok(summary)
    }

    /// Clone into a hidden `installed/.<pkg>.<uuid>.tmp/<pkg>` and move the
    /// checkout into place only once the clone has succeeded. A clone that
    /// fails or is killed at its deadline leaves no package directory.
    fn clone_staged(&self, resolved: &ResolvedPackage, dest: &Path) -> Result<VcsOutput> {
        let pkg_name = resolved.pkg_name.as_str();
        let installed_dir = self.layout.installed_dir();
        let staging_dir = installed_dir.join(format!(".{}.{}.tmp", pkg_name, Uuid::new_v4()));
        fs::create_dir_all(&staging_dir).map_err(|e| FsError::io(&staging_dir, e))?;

        tracing::debug!(pkg = %pkg_name, source = %resolved.source_url, "cloning package");
        let result = self.vcs.clone_repo(
            &staging_dir,
            &resolved.source_url,
            Path::new(pkg_name),
            &CloneOptions::default(),
        );

        let output = match result {
            Ok(output) if output.success() => output,
            Ok(output) => {
                discard_staging(&staging_dir);
                return Err(Error::vcs(format!("clone of '{}'", resolved.source_url), output));
            }
            Err(e) => {
                discard_staging(&staging_dir);
                return Err(e.into());
            }
        };

        let checkout = staging_dir.join(pkg_name);
        let moved = fs::rename(&checkout, dest).map_err(|e| FsError::io(dest, e));
        discard_staging(&staging_dir);
        moved?;

        Ok(output)
    }

    fn run_hooks(&self, resolved: &ResolvedPackage, summary: &mut InstallSummary) {
        let requirements = Layout::requirements_path(&summary.path);
        if requirements.is_file() {
            match self.deps.install_requirements(&requirements) {
                Ok(()) => summary.dependencies_installed = true,
                Err(e) => {
                    tracing::warn!(pkg = %summary.pkg_name, error = %e, "dependency install failed");
                    summary
                        .warnings
                        .push(format!("dependency install failed: {}", e));
                }
            }
        }

        if let Err(e) = self.host.reload_all() {
            tracing::warn!(pkg = %summary.pkg_name, error = %e, "plugin reload failed");
            summary.warnings.push(format!("plugin reload failed: {}", e));
        }

        for plugin in &resolved.default_enable {
            match self.host.activate(plugin) {
                Ok(()) => summary.activated.push(plugin.clone()),
                Err(e) => {
                    tracing::warn!(plugin = %plugin, error = %e, "plugin activation failed");
                    summary
                        .warnings
                        .push(format!("activation of '{}' failed: {}", plugin, e));
                }
            }
        }
    }
}
