//! In-memory package catalog.

use std::path::Path;

use pkgm_fs::{Layout, io};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;
use crate::error::{Error, Result};

/// Package list of one metadata descriptor.
///
/// Entries keep the order of the source document. Lookup is first match
/// wins; duplicate `pkg_name`s are tolerated, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    packages: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries, keeping their order.
    pub fn from_entries(packages: Vec<CatalogEntry>) -> Self {
        Self { packages }
    }

    /// Parse descriptor JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse the descriptor file at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DescriptorNotFound(path.to_path_buf()));
        }

        let content = io::read_text(path)?;
        let catalog: Self = serde_json::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), packages = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Entries whose display name or description matches `pattern`,
    /// case-insensitively.
    pub fn search(&self, pattern: &str) -> Result<Vec<&CatalogEntry>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(self
            .packages
            .iter()
            .filter(|entry| regex.is_match(&entry.name) || regex.is_match(&entry.description))
            .collect())
    }

    /// All entries in source order.
    pub fn list_all(&self) -> &[CatalogEntry] {
        &self.packages
    }

    /// First entry whose `pkg_name` equals `pkg_name` exactly.
    pub fn lookup(&self, pkg_name: &str) -> Option<&CatalogEntry> {
        self.packages.iter().find(|entry| entry.pkg_name == pkg_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Deterministic JSON rendering of the catalog.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read an installed package's own metadata from its checkout.
///
/// Uses the same descriptor shape and location as a mirror. When the
/// descriptor lists several packages, the one named like the checkout
/// directory wins, else the first.
pub fn read_package_metadata(checkout: &Path) -> Result<CatalogEntry> {
    let path = Layout::descriptor_path(checkout);
    let catalog = Catalog::from_path(&path)?;

    let dir_name = checkout
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    catalog
        .lookup(&dir_name)
        .or_else(|| catalog.list_all().first())
        .cloned()
        .ok_or(Error::NoPackages(path))
}
