//! Advisory per-name locks
//!
//! Every mutating operation on a package or a mirror holds an exclusive
//! lock on `locks/<scope>-<name>.lock` for its whole duration, so two
//! processes can never clone, pull, or trash the same name at once.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Layout, Result, validate_pkg_name};

/// What kind of name a lock protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    Package,
    Repository,
}

impl LockScope {
    fn prefix(self) -> &'static str {
        match self {
            Self::Package => "pkg",
            Self::Repository => "repo",
        }
    }
}

/// Held exclusive lock. Released on drop.
#[derive(Debug)]
pub struct NameLock {
    file: File,
    path: PathBuf,
}

impl NameLock {
    /// Block until the exclusive lock for `name` in `scope` is acquired.
    ///
    /// `name` must be a valid package name so the lock file stays inside
    /// `locks/`.
    pub fn acquire(layout: &Layout, scope: LockScope, name: &str) -> Result<Self> {
        validate_pkg_name(name)?;

        let dir = layout.locks_dir();
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

        let path = dir.join(format!("{}-{}.lock", scope.prefix(), name));
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        file.lock_exclusive()
            .map_err(|_| Error::LockFailed { path: path.clone() })?;
        tracing::trace!(lock = %path.display(), "lock acquired");

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for NameLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}
