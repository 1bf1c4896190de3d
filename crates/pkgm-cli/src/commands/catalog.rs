//! Catalog commands: search, list-all, and update.

use colored::Colorize;
use pkgm_core::{CatalogEntry, MessageSink, PackageManager};

use crate::error::Result;

fn render<'a>(entries: impl IntoIterator<Item = &'a CatalogEntry>) -> String {
    entries
        .into_iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn deliver_nonempty(sink: &dyn MessageSink, text: &str) {
    if !text.is_empty() {
        sink.deliver(text);
    }
}

/// Handle `pkgm search <pattern>`
pub fn run_search(manager: &PackageManager, sink: &dyn MessageSink, pattern: &str) -> Result<()> {
    let catalog = manager.load_catalog()?;
    let found = catalog.search(pattern)?;
    tracing::debug!(pattern = %pattern, matches = found.len(), "search finished");

    deliver_nonempty(sink, &render(found));
    Ok(())
}

/// Handle `pkgm list-all [--json]`
pub fn run_list_all(manager: &PackageManager, sink: &dyn MessageSink, json: bool) -> Result<()> {
    let catalog = manager.load_catalog()?;
    if json {
        sink.deliver(&catalog.to_json_pretty()?);
    } else {
        deliver_nonempty(sink, &render(catalog.list_all()));
    }
    Ok(())
}

/// Handle `pkgm update`
///
/// On failure the previous mirror and its catalog stay in place.
pub fn run_update(manager: &PackageManager, sink: &dyn MessageSink) -> Result<()> {
    let refresh = manager.refresh()?;

    deliver_nonempty(sink, refresh.output.output.trim_end());
    sink.deliver(&format!(
        "{} Repository \"{}\" has {} package(s)",
        "=>".blue().bold(),
        manager.options().central_repo_name,
        refresh.catalog.len()
    ));
    Ok(())
}
