//! Package commands: install, upgrade, uninstall, and list.

use pkgm_core::{ErrorKind, MessageSink, PackageManager};

use crate::commands::NO_PACKAGES;
use crate::error::{CliError, Result};

/// Handle `pkgm install <identifiers...>`
///
/// URLs install without a catalog, so a missing or unreadable mirror only
/// fails the identifiers that need a lookup. Those report the load error.
pub fn run_install(
    manager: &PackageManager,
    sink: &dyn MessageSink,
    identifiers: &[String],
) -> Result<()> {
    let (catalog, load_error) = match manager.load_catalog() {
        Ok(catalog) => (Some(catalog), None),
        Err(e) if e.kind() == ErrorKind::CatalogUnavailable => (None, None),
        Err(e) => {
            tracing::warn!(error = %e, "catalog unreadable, only URLs can be installed");
            (None, Some(e))
        }
    };

    let report = manager.install(catalog.as_ref(), identifiers);
    for outcome in report.iter() {
        match &outcome.result {
            Ok(summary) => {
                let mut text = String::new();
                let clone_output = summary.clone_output.trim_end();
                if !clone_output.is_empty() {
                    text.push_str(clone_output);
                    text.push('\n');
                }
                text.push_str(&format!("Successfully installed plugin: {}", outcome.name));
                for warning in &summary.warnings {
                    text.push_str(&format!("\nwarning: {}", warning));
                }
                sink.deliver(&text);
            }
            Err(e) => match &load_error {
                Some(load) if e.kind() == ErrorKind::CatalogUnavailable => {
                    sink.deliver(&format!("{}: {}", outcome.name, load));
                }
                _ => sink.deliver(&e.to_string()),
            },
        }
    }

    CliError::check_items(report.failed().count(), report.len())
}

/// Handle `pkgm upgrade [pkg]`
pub fn run_upgrade(manager: &PackageManager, sink: &dyn MessageSink, pkg: Option<&str>) -> Result<()> {
    if let Some(pkg_name) = pkg {
        let output = manager.upgrade_one(pkg_name)?;
        sink.deliver(&format!("{}: {}", pkg_name, output.output.trim()));
        return CliError::check_items(usize::from(!output.success()), 1);
    }

    let report = manager.upgrade_all()?;
    if report.is_empty() {
        sink.deliver(NO_PACKAGES);
        return Ok(());
    }

    let mut failed = 0;
    let mut lines = Vec::with_capacity(report.len());
    for outcome in report.iter() {
        match &outcome.result {
            Ok(output) => {
                if !output.success() {
                    failed += 1;
                }
                lines.push(format!("{}: {}", outcome.name, output.output.trim()));
            }
            Err(e) => {
                failed += 1;
                lines.push(format!("{}: {}", outcome.name, e));
            }
        }
    }
    sink.deliver(&lines.join("\n"));

    CliError::check_items(failed, report.len())
}

/// Handle `pkgm uninstall <names...>`
pub fn run_uninstall(manager: &PackageManager, sink: &dyn MessageSink, names: &[String]) -> Result<()> {
    let report = manager.uninstall(names);
    for outcome in report.iter() {
        match &outcome.result {
            Ok(_) => sink.deliver(&format!("Uninstalled plugin: {}", outcome.name)),
            Err(e) => sink.deliver(&e.to_string()),
        }
    }

    CliError::check_items(report.failed().count(), report.len())
}

/// Handle `pkgm list`
pub fn run_list(manager: &PackageManager, sink: &dyn MessageSink) -> Result<()> {
    let packages = manager.list_installed()?;
    if packages.is_empty() {
        sink.deliver(NO_PACKAGES);
        return Ok(());
    }

    let lines: Vec<String> = packages
        .iter()
        .map(|pkg| match &pkg.metadata {
            Some(meta) => format!("{} | {} | {}", pkg.pkg_name, meta.version, meta.description),
            None => pkg.pkg_name.clone(),
        })
        .collect();
    sink.deliver(&lines.join("\n"));
    Ok(())
}
