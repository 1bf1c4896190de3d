//! Options commands: config get, set, and list.

use std::path::Path;

use pkgm_core::{Layout, MessageSink, Options};
use pkgm_fs::options::KEYS;

use crate::cli::ConfigAction;
use crate::error::Result;

/// Handle `pkgm config <action>`
///
/// Works on `options.toml` alone, so it never needs the VCS binary.
pub fn run_config(base: &Path, sink: &dyn MessageSink, action: ConfigAction) -> Result<()> {
    let layout = Layout::new(base);
    let mut options = Options::load_or_init(&layout)?;

    match action {
        ConfigAction::Get { key } => sink.deliver(&options.get(&key)?),
        ConfigAction::Set { key, value } => {
            options.set(&key, &value)?;
            options.save(&layout.options_path())?;
            tracing::info!(key = %key, "option saved");
            sink.deliver(&format!("{} = {}", key, options.get(&key)?));
        }
        ConfigAction::List => {
            let mut lines = Vec::with_capacity(KEYS.len());
            for key in KEYS {
                lines.push(format!("{} = {}", key, options.get(key)?));
            }
            sink.deliver(&lines.join("\n"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::BufferSink;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_get_default_writes_options_file() {
        let temp = TempDir::new().unwrap();
        let sink = BufferSink::default();

        run_config(
            temp.path(),
            &sink,
            ConfigAction::Get {
                key: "git_bin".to_string(),
            },
        )
        .unwrap();

        assert_eq!(sink.text(), "/usr/bin/git");
        assert!(temp.path().join("options.toml").is_file());
    }

    #[test]
    fn test_set_persists() {
        let temp = TempDir::new().unwrap();
        run_config(
            temp.path(),
            &BufferSink::default(),
            ConfigAction::Set {
                key: "vcs_timeout_secs".to_string(),
                value: "30".to_string(),
            },
        )
        .unwrap();

        let options = Options::load(&temp.path().join("options.toml")).unwrap();
        assert_eq!(options.vcs_timeout_secs, 30);
    }

    #[test]
    fn test_set_rejects_bad_value() {
        let temp = TempDir::new().unwrap();
        let err = run_config(
            temp.path(),
            &BufferSink::default(),
            ConfigAction::Set {
                key: "vcs_timeout_secs".to_string(),
                value: "soon".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a number"), "got: {err}");
    }

    #[test]
    fn test_list_shows_every_key() {
        let temp = TempDir::new().unwrap();
        let sink = BufferSink::default();
        run_config(temp.path(), &sink, ConfigAction::List).unwrap();

        let text = sink.text();
        assert_eq!(text.lines().count(), KEYS.len());
        assert!(text.contains("central_repo_name = main"));
    }
}
