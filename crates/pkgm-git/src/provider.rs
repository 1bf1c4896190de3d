//! VCS trait and its result type

use std::path::Path;

use crate::Result;

/// Outcome of one VCS invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsOutput {
    /// Process exit code; `-1` when terminated by a signal
    pub exit_code: i32,

    /// Combined stdout and stderr, in write order
    pub output: String,
}

impl VcsOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Optional flags for [`Vcs::clone_repo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Branch to check out instead of the remote HEAD
    pub branch: Option<String>,

    /// Also clone submodules
    pub recursive: bool,
}

/// Blocking version-control operations.
///
/// Implementations return `Ok` whenever the command ran, whatever its exit
/// code; callers inspect [`VcsOutput::success`].
pub trait Vcs: Send + Sync {
    /// Clone `source` into `dest`, resolved relative to `work_dir`.
    fn clone_repo(
        &self,
        work_dir: &Path,
        source: &str,
        dest: &Path,
        options: &CloneOptions,
    ) -> Result<VcsOutput>;

    /// Pull the tracked upstream into the checkout at `repo_dir`.
    fn pull(&self, repo_dir: &Path) -> Result<VcsOutput>;

    /// Reset the checkout at `repo_dir`, discarding local changes when `hard`.
    fn reset(&self, repo_dir: &Path, hard: bool) -> Result<VcsOutput>;
}
