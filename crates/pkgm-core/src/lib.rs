//! Package lifecycle orchestration for pkgm
//!
//! Composes the VCS adapter, the catalog, and the on-disk layout into the
//! user-facing operations: refreshing a mirror, installing, upgrading, and
//! uninstalling packages. Batch operations return a [`Report`] with one
//! outcome per item; a failing item never stops the others and nothing is
//! rolled back.

pub mod error;
pub mod host;
pub mod install;
pub mod installed;
pub mod manager;
pub mod mirror;
pub mod report;
pub mod trash;
pub mod uninstall;
pub mod upgrade;

pub use error::{Error, ErrorKind, Result};
pub use host::{DependencyInstaller, HostError, MessageSink, NullHost, PluginHost};
pub use install::{InstallSummary, Installer, ResolvedPackage, pkg_name_from_url, resolve};
pub use installed::{InstalledPackage, list_installed};
pub use manager::PackageManager;
pub use mirror::{Mirror, Refresh};
pub use report::{Outcome, Report};
pub use trash::{Trash, TrashEntry};
pub use uninstall::Uninstaller;
pub use upgrade::Upgrader;

pub use pkgm_catalog::{Catalog, CatalogEntry};
pub use pkgm_fs::{Layout, Options};
pub use pkgm_git::{Vcs, VcsOutput};
