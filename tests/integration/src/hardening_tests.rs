//! Locking and subprocess deadlines across crates.

use std::fs;
use std::sync::Barrier;
use std::time::{Duration, Instant};

use pkgm_core::{Error, ErrorKind, NullHost, Options, PackageManager};
use pkgm_test_utils::descriptor::{descriptor, package};
use pkgm_test_utils::git::{source_of, upstream_repo};
use pkgm_test_utils::sandbox::Sandbox;

fn git_manager(sandbox: &Sandbox, options: Options) -> PackageManager {
    PackageManager::with_git(
        sandbox.layout().clone(),
        options,
        Box::new(NullHost),
        Box::new(NullHost),
    )
    .unwrap()
}

#[test]
fn concurrent_installs_of_one_package_clone_once() {
    let sandbox = Sandbox::new();
    let weather_path = sandbox.root().join("upstreams/weather");
    upstream_repo(&weather_path, &[("weather.py", "# weather\n")]);
    let catalog = pkgm_core::Catalog::from_json(&descriptor(vec![package(
        "weather",
        "Weather",
        "Shows current weather",
        &source_of(&weather_path),
    )]))
    .unwrap();

    let options = Options {
        git_bin: "git".into(),
        ..Options::default()
    };
    let manager = git_manager(&sandbox, options);
    let barrier = Barrier::new(2);
    let (manager, catalog, barrier) = (&manager, &catalog, &barrier);

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    manager
                        .install(Some(catalog), &["weather"])
                        .into_iter()
                        .next()
                        .unwrap()
                        .result
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let ok = results.iter().filter(|r| r.is_ok()).count();
    let refused = results
        .iter()
        .filter(|r| matches!(r, Err(Error::AlreadyInstalled { .. })))
        .count();
    assert_eq!((ok, refused), (1, 1));
    assert!(sandbox.layout().package_dir("weather").join("weather.py").is_file());
}

#[cfg(unix)]
#[test]
fn hanging_vcs_is_killed_at_deadline() {
    let sandbox = Sandbox::new();

    // `sh clone -- <src> <dest>` runs the script named `clone` in repos/
    fs::write(sandbox.layout().repos_dir().join("clone"), "exec sleep 30\n").unwrap();

    let options = Options {
        git_bin: "sh".into(),
        vcs_timeout_secs: 1,
        ..Options::default()
    };
    let manager = git_manager(&sandbox, options);

    let started = Instant::now();
    let err = manager.refresh().unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(20));
    assert_eq!(err.kind(), ErrorKind::VcsFailure);
    assert!(
        matches!(err, Error::VcsAdapter(pkgm_git::Error::TimedOut { .. })),
        "got: {err:?}"
    );
    assert!(manager.mirror().list().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn package_clone_killed_at_deadline_leaves_nothing_installed() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    let installed = sandbox.layout().installed_dir();

    // `git clone -- <src> <dest>`: write a partial checkout, then hang
    let fake_git = sandbox.root().join("fake-git");
    fs::write(
        &fake_git,
        "#!/bin/sh\nmkdir \"$4\"\necho partial > \"$4/weather.py\"\nexec sleep 30\n",
    )
    .unwrap();
    fs::set_permissions(&fake_git, fs::Permissions::from_mode(0o755)).unwrap();

    let options = Options {
        git_bin: fake_git,
        vcs_timeout_secs: 1,
        ..Options::default()
    };
    let manager = git_manager(&sandbox, options);

    let first = manager.install(None, &["https://example.test/weather.git"]);
    let err = first.into_iter().next().unwrap().result.unwrap_err();
    assert!(
        matches!(err, Error::VcsAdapter(pkgm_git::Error::TimedOut { .. })),
        "got: {err:?}"
    );

    assert!(!sandbox.layout().package_dir("weather").exists());
    assert!(manager.list_installed().unwrap().is_empty());
    let leftovers: Vec<_> = fs::read_dir(&installed)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(leftovers.is_empty(), "left behind: {leftovers:?}");
}
