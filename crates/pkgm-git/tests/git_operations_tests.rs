//! Clone, pull, and reset against real git repositories

use pkgm_git::{CloneOptions, GitCli, Vcs};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(cwd: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn setup_upstream() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    git(root, &["init"]);
    git(root, &["config", "user.email", "test@example.com"]);
    git(root, &["config", "user.name", "Test User"]);
    git(root, &["config", "commit.gpgsign", "false"]);

    fs::write(root.join("README.md"), "# Upstream").unwrap();
    git(root, &["add", "README.md"]);
    git(root, &["commit", "-m", "Initial commit"]);

    temp
}

#[test]
fn test_clone_local_upstream() {
    let upstream = setup_upstream();
    let work = TempDir::new().unwrap();

    let result = GitCli::new("git")
        .clone_repo(
            work.path(),
            upstream.path().to_str().unwrap(),
            Path::new("checkout"),
            &CloneOptions::default(),
        )
        .unwrap();

    assert!(result.success(), "clone failed: {}", result.output);
    assert!(work.path().join("checkout/README.md").is_file());
}

#[test]
fn test_clone_missing_source_exits_nonzero() {
    let work = TempDir::new().unwrap();
    let missing = work.path().join("no-such-upstream");

    let result = GitCli::new("git")
        .clone_repo(
            work.path(),
            missing.to_str().unwrap(),
            Path::new("checkout"),
            &CloneOptions::default(),
        )
        .unwrap();

    assert!(!result.success());
    assert!(!result.output.is_empty());
    assert!(!work.path().join("checkout").exists());
}

#[test]
fn test_pull_fetches_new_commit() {
    let upstream = setup_upstream();
    let work = TempDir::new().unwrap();
    let adapter = GitCli::new("git");
    adapter
        .clone_repo(
            work.path(),
            upstream.path().to_str().unwrap(),
            Path::new("checkout"),
            &CloneOptions::default(),
        )
        .unwrap();

    fs::write(upstream.path().join("CHANGELOG.md"), "v2").unwrap();
    git(upstream.path(), &["add", "CHANGELOG.md"]);
    git(upstream.path(), &["commit", "-m", "Second commit"]);

    let checkout = work.path().join("checkout");
    let result = adapter.pull(&checkout).unwrap();

    assert!(result.success(), "pull failed: {}", result.output);
    assert_eq!(fs::read_to_string(checkout.join("CHANGELOG.md")).unwrap(), "v2");
}

#[test]
fn test_reset_hard_discards_local_changes() {
    let upstream = setup_upstream();
    let work = TempDir::new().unwrap();
    let adapter = GitCli::new("git");
    adapter
        .clone_repo(
            work.path(),
            upstream.path().to_str().unwrap(),
            Path::new("checkout"),
            &CloneOptions::default(),
        )
        .unwrap();

    let checkout = work.path().join("checkout");
    fs::write(checkout.join("README.md"), "local edit").unwrap();

    let result = adapter.reset(&checkout, true).unwrap();

    assert!(result.success(), "reset failed: {}", result.output);
    assert_eq!(fs::read_to_string(checkout.join("README.md")).unwrap(), "# Upstream");
}
