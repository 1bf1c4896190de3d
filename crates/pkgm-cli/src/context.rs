//! Package manager construction from the command line's base directory.

use std::path::Path;

use pkgm_core::{Layout, Options, PackageManager};

use crate::error::Result;
use crate::host::{LogHost, PipInstaller};

/// Open the manager rooted at `base`, creating the layout and the default
/// options file on first use.
pub fn open_manager(base: &Path) -> Result<PackageManager> {
    let layout = Layout::new(base);
    layout.ensure_dirs()?;
    let options = Options::load_or_init(&layout)?;

    tracing::debug!(
        base = %base.display(),
        git_bin = %options.git_bin.display(),
        repo = %options.central_repo_name,
        "opening package manager"
    );

    Ok(PackageManager::with_git(
        layout,
        options,
        Box::new(LogHost),
        Box::new(PipInstaller::default()),
    )?)
}
