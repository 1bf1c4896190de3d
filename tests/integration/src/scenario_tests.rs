//! Cross-crate scenarios against real git repositories.
//!
//! Each test builds upstream repositories with history, points a
//! [`PackageManager`] driving the `git` binary at them, and walks a user
//! story end to end.

use std::fs;
use std::path::{Path, PathBuf};

use pkgm_core::{ErrorKind, NullHost, Options, PackageManager};
use pkgm_test_utils::descriptor::{descriptor, package, package_enabling};
use pkgm_test_utils::git::{commit_files, source_of, upstream_repo};
use pkgm_test_utils::sandbox::Sandbox;
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Upstreams {
    central: git2::Repository,
    central_path: PathBuf,
    weather: git2::Repository,
    weather_path: PathBuf,
}

impl Upstreams {
    fn new(root: &Path) -> Self {
        let weather_path = root.join("weather");
        let weather = upstream_repo(
            &weather_path,
            &[
                ("weather.py", "VERSION = 1\n"),
                ("requirements.txt", "requests\n"),
            ],
        );

        let central_path = root.join("central");
        let central = upstream_repo(
            &central_path,
            &[(
                "repo.json",
                &descriptor(vec![package(
                    "weather",
                    "Weather",
                    "Shows current weather",
                    &source_of(&weather_path),
                )]),
            )],
        );

        Self {
            central,
            central_path,
            weather,
            weather_path,
        }
    }

    /// Publish a second package to the central catalog.
    fn publish_dice(&self, root: &Path) {
        let dice_path = root.join("dice");
        upstream_repo(&dice_path, &[("dice.py", "# dice\n")]);

        commit_files(
            &self.central,
            &[(
                "repo.json",
                &descriptor(vec![
                    package(
                        "weather",
                        "Weather",
                        "Shows current weather",
                        &source_of(&self.weather_path),
                    ),
                    package_enabling(
                        "dice",
                        "Dice",
                        "Rolls polyhedral dice",
                        &source_of(&dice_path),
                        &["dice"],
                    ),
                ]),
            )],
            "Add dice",
        );
    }
}

fn manager(sandbox: &Sandbox, upstreams: &Upstreams) -> PackageManager {
    let options = Options {
        git_bin: "git".into(),
        central_repo_url: source_of(&upstreams.central_path),
        ..Options::default()
    };
    PackageManager::with_git(
        sandbox.layout().clone(),
        options,
        Box::new(NullHost),
        Box::new(NullHost),
    )
    .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_catalog_grows_between_updates() {
    let sandbox = Sandbox::new();
    let upstreams = Upstreams::new(&sandbox.root().join("upstreams"));
    let manager = manager(&sandbox, &upstreams);

    let before = manager.refresh().unwrap().catalog;
    assert_eq!(before.len(), 1);
    assert!(before.search("dice").unwrap().is_empty());

    upstreams.publish_dice(&sandbox.root().join("upstreams"));

    let after = manager.refresh().unwrap().catalog;
    assert_eq!(after.len(), 2);
    let found = after.search("POLYHEDRAL").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].default_enable, vec!["dice".to_string()]);

    // the parsed catalog on disk matches what refresh returned
    assert_eq!(manager.load_catalog().unwrap(), after);
}

#[test]
fn scenario_failed_update_keeps_previous_catalog() {
    let sandbox = Sandbox::new();
    let upstreams = Upstreams::new(&sandbox.root().join("upstreams"));
    let manager = manager(&sandbox, &upstreams);
    let catalog = manager.refresh().unwrap().catalog;

    // the remote disappears
    fs::remove_dir_all(&upstreams.central_path).unwrap();

    let err = manager.refresh().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VcsFailure);
    assert_eq!(manager.load_catalog().unwrap(), catalog);
}

#[test]
fn scenario_install_upgrade_uninstall_reinstall() {
    let sandbox = Sandbox::new();
    let upstreams = Upstreams::new(&sandbox.root().join("upstreams"));
    let manager = manager(&sandbox, &upstreams);
    let catalog = manager.refresh().unwrap().catalog;

    let report = manager.install(Some(&catalog), &["weather"]);
    let summary = report.get("weather").unwrap().result.as_ref().unwrap();
    assert!(summary.dependencies_installed);

    commit_files(&upstreams.weather, &[("weather.py", "VERSION = 2\n")], "v2");
    let report = manager.upgrade_all().unwrap();
    assert!(report.get("weather").unwrap().result.as_ref().unwrap().success());
    let plugin = sandbox.layout().package_dir("weather").join("weather.py");
    assert_eq!(fs::read_to_string(&plugin).unwrap(), "VERSION = 2\n");

    assert!(manager.uninstall(&["weather"]).all_succeeded());
    assert!(manager.install(Some(&catalog), &["weather"]).all_succeeded());
    assert!(manager.uninstall(&["weather"]).all_succeeded());

    let trashed = sandbox.trash_names();
    assert_eq!(trashed.len(), 2);
    assert_ne!(trashed[0], trashed[1]);
    for name in &trashed {
        let copy = sandbox.layout().trash_dir().join(name).join("weather.py");
        assert_eq!(fs::read_to_string(copy).unwrap(), "VERSION = 2\n");
    }
}

#[test]
fn scenario_reinstall_over_existing_is_refused() {
    let sandbox = Sandbox::new();
    let upstreams = Upstreams::new(&sandbox.root().join("upstreams"));
    let manager = manager(&sandbox, &upstreams);
    let catalog = manager.refresh().unwrap().catalog;

    assert!(manager.install(Some(&catalog), &["weather"]).all_succeeded());
    let local_edit = sandbox.layout().package_dir("weather").join("local.cfg");
    fs::write(&local_edit, "mine").unwrap();

    let report = manager.install(Some(&catalog), &["weather"]);
    let err = report.get("weather").unwrap().result.as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(fs::read_to_string(&local_edit).unwrap(), "mine");
}
