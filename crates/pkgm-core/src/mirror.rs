//! Repository mirror synchronization
//!
//! A mirror is a read-only local checkout of a remote catalog source under
//! `repos/<name>`. It is forced to match the remote (hard reset, then pull)
//! rather than merged, so no conflict state can ever need resolving.

use std::fs;
use std::path::Path;

use pkgm_catalog::Catalog;
use pkgm_fs::{Error as FsError, Layout, LockScope, NameLock, io, validate_pkg_name};
use pkgm_git::{CloneOptions, Vcs, VcsOutput};
use uuid::Uuid;

use crate::{Error, Result};

/// Outcome of a successful [`Mirror::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    /// Output of the last VCS command (clone or pull)
    pub output: VcsOutput,
    /// Freshly parsed catalog, ready to replace the previous one
    pub catalog: Catalog,
}

/// Synchronizes mirrors under the layout's `repos/` directory.
pub struct Mirror<'a> {
    layout: &'a Layout,
    vcs: &'a dyn Vcs,
}

impl<'a> Mirror<'a> {
    pub fn new(layout: &'a Layout, vcs: &'a dyn Vcs) -> Self {
        Self { layout, vcs }
    }

    /// Bring `repos/<name>` up to date with `url`.
    ///
    /// A first sync clones into a hidden staging directory and renames it
    /// into place only when the clone succeeds, so a failed clone never
    /// leaves a half-populated mirror.
    pub fn ensure(&self, name: &str, url: &str) -> Result<VcsOutput> {
        validate_pkg_name(name)?;
        let _lock = NameLock::acquire(self.layout, LockScope::Repository, name)?;

        let mirror_dir = self.layout.mirror_dir(name);
        if mirror_dir.is_dir() {
            self.update_existing(name, &mirror_dir)
        } else {
            self.clone_fresh(name, url, &mirror_dir)
        }
    }

    fn update_existing(&self, name: &str, mirror_dir: &Path) -> Result<VcsOutput> {
        tracing::debug!(repo = %name, "resetting mirror before pull");
        let reset = self.vcs.reset(mirror_dir, true)?;
        if !reset.success() {
            return Err(Error::vcs(format!("reset of mirror '{}'", name), reset));
        }

        let pull = self.vcs.pull(mirror_dir)?;
        if !pull.success() {
            return Err(Error::vcs(format!("pull of mirror '{}'", name), pull));
        }

        tracing::info!(repo = %name, "mirror updated");
        Ok(pull)
    }

    fn clone_fresh(&self, name: &str, url: &str, mirror_dir: &Path) -> Result<VcsOutput> {
        let repos_dir = self.layout.repos_dir();
        fs::create_dir_all(&repos_dir).map_err(|e| FsError::io(&repos_dir, e))?;

        let staging_name = format!(".{}.{}.tmp", name, Uuid::new_v4());
        let staging_dir = repos_dir.join(&staging_name);

        let result = self.vcs.clone_repo(
            &repos_dir,
            url,
            Path::new(&staging_name),
            &CloneOptions::default(),
        );

        let output = match result {
            Ok(output) if output.success() => output,
            Ok(output) => {
                discard_staging(&staging_dir);
                return Err(Error::vcs(format!("clone of '{}'", url), output));
            }
            Err(e) => {
                discard_staging(&staging_dir);
                return Err(e.into());
            }
        };

        fs::rename(&staging_dir, mirror_dir).map_err(|e| FsError::io(mirror_dir, e))?;
        tracing::info!(repo = %name, url = %url, "mirror cloned");
        Ok(output)
    }

    /// Parse the descriptor at the root of `repos/<name>`.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog> {
        validate_pkg_name(name)?;
        let mirror_dir = self.layout.mirror_dir(name);
        if !mirror_dir.is_dir() {
            return Err(Error::CatalogUnavailable {
                repo: name.to_string(),
            });
        }

        Ok(Catalog::from_path(&Layout::descriptor_path(&mirror_dir))?)
    }

    /// Sync the mirror, then parse its catalog.
    ///
    /// Either both steps succeed and a complete new catalog is returned, or
    /// the error is returned and the caller keeps its previous catalog.
    pub fn refresh(&self, name: &str, url: &str) -> Result<Refresh> {
        let output = self.ensure(name, url)?;
        let catalog = self.load_catalog(name)?;
        Ok(Refresh { output, catalog })
    }

    /// Names of the mirrors present on disk, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(io::list_dir_names(&self.layout.repos_dir())?)
    }
}

/// Remove a staging directory left by an unfinished clone.
pub(crate) fn discard_staging(staging_dir: &Path) {
    if !staging_dir.exists() {
        return;
    }
    if let Err(e) = fs::remove_dir_all(staging_dir) {
        tracing::warn!(
            path = %staging_dir.display(),
            error = %e,
            "failed to remove staging directory"
        );
    }
}
