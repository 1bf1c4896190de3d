//! In-memory VCS for tests that should not need a git binary.
//!
//! Sources are registered by URL with the files a clone materializes.
//! Cloning an unregistered source exits 128 without creating anything,
//! like git does. Every call is recorded for later assertions.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use pkgm_git::{CloneOptions, Error, Result, Vcs, VcsOutput};

/// Marker written into every fake checkout, naming its source.
pub const ORIGIN_FILE: &str = ".fake-origin";

/// One recorded VCS invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Clone { source: String, dest: PathBuf },
    Pull { repo_dir: PathBuf },
    Reset { repo_dir: PathBuf, hard: bool },
}

#[derive(Debug, Default)]
struct State {
    sources: HashMap<String, Vec<(String, String)>>,
    failing_pulls: HashSet<String>,
    missing_binary: bool,
    calls: Vec<VcsCall>,
}

/// Shareable fake; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct FakeVcs {
    state: Arc<Mutex<State>>,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source`; a clone of it writes `files` into the checkout.
    pub fn with_source(self, source: &str, files: &[(&str, &str)]) -> Self {
        self.set_source(source, files);
        self
    }

    /// Replace the content of `source`, as if upstream gained a commit.
    /// The next pull of any checkout of `source` rewrites these files.
    pub fn set_source(&self, source: &str, files: &[(&str, &str)]) {
        let files = files
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect();
        self.lock().sources.insert(source.to_string(), files);
    }

    /// Make pulls in any checkout directory named `dir_name` exit 1.
    pub fn fail_pulls_in(self, dir_name: &str) -> Self {
        self.lock().failing_pulls.insert(dir_name.to_string());
        self
    }

    /// Make every call fail as if the git binary did not exist.
    pub fn missing_binary(self) -> Self {
        self.lock().missing_binary = true;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<VcsCall> {
        self.lock().calls.clone()
    }

    /// Number of clone calls made so far.
    pub fn clone_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, VcsCall::Clone { .. }))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_binary(state: &State) -> Result<()> {
        if state.missing_binary {
            return Err(Error::BinaryNotFound {
                path: PathBuf::from("/nonexistent/git"),
            });
        }
        Ok(())
    }
}

fn write_files(dir: &Path, files: &[(String, String)]) {
    for (name, content) in files {
        let file = dir.join(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("FakeVcs: mkdir {}: {e}", parent.display()));
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("FakeVcs: write {}: {e}", file.display()));
    }
}

fn output(exit_code: i32, text: impl Into<String>) -> VcsOutput {
    VcsOutput {
        exit_code,
        output: text.into(),
    }
}

impl Vcs for FakeVcs {
    fn clone_repo(
        &self,
        work_dir: &Path,
        source: &str,
        dest: &Path,
        _options: &CloneOptions,
    ) -> Result<VcsOutput> {
        let mut state = self.lock();
        Self::check_binary(&state)?;

        let target = work_dir.join(dest);
        state.calls.push(VcsCall::Clone {
            source: source.to_string(),
            dest: target.clone(),
        });

        if target.exists() {
            return Ok(output(
                128,
                format!(
                    "fatal: destination path '{}' already exists and is not an empty directory.\n",
                    dest.display()
                ),
            ));
        }

        let Some(files) = state.sources.get(source) else {
            return Ok(output(
                128,
                format!("fatal: repository '{source}' not found\n"),
            ));
        };

        fs::create_dir_all(&target)
            .unwrap_or_else(|e| panic!("FakeVcs: mkdir {}: {e}", target.display()));
        write_files(&target, files);
        fs::write(target.join(ORIGIN_FILE), source)
            .unwrap_or_else(|e| panic!("FakeVcs: write origin: {e}"));

        Ok(output(0, format!("Cloning into '{}'...\n", dest.display())))
    }

    fn pull(&self, repo_dir: &Path) -> Result<VcsOutput> {
        let mut state = self.lock();
        Self::check_binary(&state)?;
        state.calls.push(VcsCall::Pull {
            repo_dir: repo_dir.to_path_buf(),
        });

        let dir_name = repo_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if state.failing_pulls.contains(&dir_name) {
            return Ok(output(
                1,
                "fatal: unable to access remote: Could not resolve host\n",
            ));
        }

        let origin = fs::read_to_string(repo_dir.join(ORIGIN_FILE)).unwrap_or_default();
        match state.sources.get(&origin) {
            Some(files) => {
                write_files(repo_dir, files);
                Ok(output(0, "Already up to date.\n"))
            }
            None => Ok(output(1, "fatal: not a git repository\n")),
        }
    }

    fn reset(&self, repo_dir: &Path, hard: bool) -> Result<VcsOutput> {
        let mut state = self.lock();
        Self::check_binary(&state)?;
        state.calls.push(VcsCall::Reset {
            repo_dir: repo_dir.to_path_buf(),
            hard,
        });
        Ok(output(0, "HEAD is now at 0000000 fake\n"))
    }
}
