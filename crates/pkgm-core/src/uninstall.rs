//! Package removal via the trash

use std::fs;

use pkgm_fs::{Error as FsError, Layout, LockScope, NameLock, validate_pkg_name};

use crate::trash::{Trash, TrashEntry};
use crate::{Error, Report, Result};

pub struct Uninstaller<'a> {
    layout: &'a Layout,
    trash: Trash,
}

impl<'a> Uninstaller<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            trash: Trash::new(layout.trash_dir()),
        }
    }

    /// Move every installed entry matching each name into the trash.
    pub fn uninstall<S: AsRef<str>>(&self, names: &[S]) -> Report<Vec<TrashEntry>> {
        let mut report = Report::new();
        for name in names {
            let name = name.as_ref();
            report.push(name, self.uninstall_one(name));
        }
        report
    }

    /// Trash the entries of `installed/` named exactly `name`.
    pub fn uninstall_one(&self, name: &str) -> Result<Vec<TrashEntry>> {
        let not_found = || Error::NotFound {
            name: name.to_string(),
        };

        if validate_pkg_name(name).is_err() {
            return Err(not_found());
        }
        let _lock = NameLock::acquire(self.layout, LockScope::Package, name)?;

        let installed_dir = self.layout.installed_dir();
        if !installed_dir.is_dir() {
            return Err(not_found());
        }

        let mut trashed = Vec::new();
        for entry in fs::read_dir(&installed_dir).map_err(|e| FsError::io(&installed_dir, e))? {
            let entry = entry.map_err(|e| FsError::io(&installed_dir, e))?;
            if entry.file_name() != name {
                continue;
            }
            trashed.push(self.trash.discard(&entry.path(), name)?);
        }

        if trashed.is_empty() {
            tracing::debug!(pkg = %name, "nothing to uninstall");
            return Err(not_found());
        }

        Ok(trashed)
    }
}
