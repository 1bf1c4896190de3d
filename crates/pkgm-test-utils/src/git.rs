//! Upstream git repositories with real history, built with `git2`.
//!
//! Clones and pulls in tests go through the `git` binary; these fixtures
//! only create the repositories being cloned from.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};

/// Initialise a repository at `path` and commit `files` to it.
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn upstream_repo(path: &Path, files: &[(&str, &str)]) -> Repository {
    fs::create_dir_all(path)
        .unwrap_or_else(|e| panic!("upstream_repo: mkdir {}: {e}", path.display()));
    let repo = Repository::init(path).unwrap_or_else(|e| {
        panic!("upstream_repo: failed to init {}: {e}", path.display())
    });
    commit_files(&repo, files, "Initial commit");
    repo
}

/// Write `files` into the working tree of `repo` and commit all changes.
///
/// # Panics
/// Panics if any filesystem or git operation fails.
pub fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str) {
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| panic!("commit_files: repository is bare"));

    for (name, content) in files {
        let file = workdir.join(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("commit_files: mkdir {}: {e}", parent.display()));
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("commit_files: write {}: {e}", file.display()));
    }

    let mut index = repo.index().expect("commit_files: no index");
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .expect("commit_files: add_all failed");
    index.write().expect("commit_files: index write failed");

    let tree_id = index.write_tree().expect("commit_files: write_tree failed");
    let tree = repo.find_tree(tree_id).expect("commit_files: tree missing");
    let signature =
        Signature::now("Test User", "test@test.com").expect("commit_files: bad signature");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit_files: commit failed: {e}"));
}

/// `path` as a clone source string.
pub fn source_of(path: &Path) -> String {
    path.to_str()
        .unwrap_or_else(|| panic!("source_of: non UTF-8 path {}", path.display()))
        .to_string()
}
