//! Persisted package-manager options (`options.toml`)
//!
//! Missing keys fall back to their defaults. The first `load_or_init`
//! writes the defaults to disk so the file is there to edit.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Layout, Result, io};

pub const DEFAULT_GIT_BIN: &str = "/usr/bin/git";
pub const DEFAULT_VCS_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CENTRAL_REPO_NAME: &str = "main";
pub const DEFAULT_CENTRAL_REPO_URL: &str =
    "https://github.com/datamachine/telegram-pybot-plugin-repo";

/// Option keys accepted by [`Options::get`] and [`Options::set`].
pub const KEYS: &[&str] = &[
    "git_bin",
    "vcs_timeout_secs",
    "central_repo_name",
    "central_repo_url",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Version-control executable used for clone, pull, and reset.
    pub git_bin: PathBuf,
    /// Deadline for a single VCS subprocess. `0` disables it.
    pub vcs_timeout_secs: u64,
    /// Name of the mirror the catalog is read from.
    pub central_repo_name: String,
    /// Remote the central mirror is cloned from.
    pub central_repo_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            git_bin: PathBuf::from(DEFAULT_GIT_BIN),
            vcs_timeout_secs: DEFAULT_VCS_TIMEOUT_SECS,
            central_repo_name: DEFAULT_CENTRAL_REPO_NAME.to_string(),
            central_repo_url: DEFAULT_CENTRAL_REPO_URL.to_string(),
        }
    }
}

impl Options {
    /// Load options from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        toml::from_str(&content).map_err(|e| Error::OptionsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the layout's options file, writing the defaults first if it
    /// does not exist.
    pub fn load_or_init(layout: &Layout) -> Result<Self> {
        let path = layout.options_path();
        if path.exists() {
            return Self::load(&path);
        }

        let options = Self::default();
        options.save(&path)?;
        tracing::debug!(path = %path.display(), "wrote default options");
        Ok(options)
    }

    /// Save options to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::OptionsSerialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        io::write_text(path, &content)
    }

    /// VCS deadline, `None` when disabled.
    pub fn vcs_timeout(&self) -> Option<Duration> {
        match self.vcs_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Read one option as text.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "git_bin" => Ok(self.git_bin.display().to_string()),
            "vcs_timeout_secs" => Ok(self.vcs_timeout_secs.to_string()),
            "central_repo_name" => Ok(self.central_repo_name.clone()),
            "central_repo_url" => Ok(self.central_repo_url.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update one option from text.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "git_bin" => {
                if value.trim().is_empty() {
                    return Err(Error::InvalidOption {
                        key: key.to_string(),
                        reason: "path is empty".to_string(),
                    });
                }
                self.git_bin = PathBuf::from(value);
            }
            "vcs_timeout_secs" => {
                self.vcs_timeout_secs = value.parse().map_err(|_| Error::InvalidOption {
                    key: key.to_string(),
                    reason: format!("'{}' is not a number of seconds", value),
                })?;
            }
            "central_repo_name" => {
                crate::validate_pkg_name(value).map_err(|e| Error::InvalidOption {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
                self.central_repo_name = value.to_string();
            }
            "central_repo_url" => self.central_repo_url = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> Error {
    Error::InvalidOption {
        key: key.to_string(),
        reason: format!("unknown key, expected one of: {}", KEYS.join(", ")),
    }
}
