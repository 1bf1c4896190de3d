//! Non-destructive removal
//!
//! Uninstalled packages are moved, never deleted. Each move gets a fresh
//! v4 UUID suffix so repeated removals of one name never collide.

use std::fs;
use std::path::{Path, PathBuf};

use pkgm_fs::Error as FsError;
use uuid::Uuid;

use crate::Result;

/// A directory moved into the trash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashEntry {
    pub original_name: String,
    /// `<original_name>.<uuid>`
    pub trashed_name: String,
    pub path: PathBuf,
}

/// Holding area for removed package directories.
#[derive(Debug, Clone)]
pub struct Trash {
    root: PathBuf,
}

impl Trash {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Move `source` to `<root>/<name>.<uuid>`.
    pub fn discard(&self, source: &Path, name: &str) -> Result<TrashEntry> {
        fs::create_dir_all(&self.root).map_err(|e| FsError::io(&self.root, e))?;

        let trashed_name = format!("{}.{}", name, Uuid::new_v4());
        let path = self.root.join(&trashed_name);
        fs::rename(source, &path).map_err(|e| FsError::io(source, e))?;

        tracing::info!(
            pkg = %name,
            trashed = %path.display(),
            "moved to trash"
        );

        Ok(TrashEntry {
            original_name: name.to_string(),
            trashed_name,
            path,
        })
    }
}
