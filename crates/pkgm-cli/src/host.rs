//! Default collaborators for running pkgm from a terminal.
//!
//! Outside a plugin host process there is nothing to reload or activate,
//! so [`LogHost`] only records the requests in the log. Dependencies are
//! installed with `pip install -r`.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use pkgm_core::{DependencyInstaller, HostError, MessageSink, PluginHost};

/// Prints each report to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn deliver(&self, text: &str) {
        println!("{}", text.trim_end());
    }
}

/// Plugin host for standalone use.
#[derive(Debug, Default)]
pub struct LogHost;

impl PluginHost for LogHost {
    fn reload_all(&self) -> Result<(), HostError> {
        tracing::info!("plugins will be picked up on the host's next start");
        Ok(())
    }

    fn activate(&self, name: &str) -> Result<(), HostError> {
        tracing::info!(plugin = %name, "default-enabled plugin");
        Ok(())
    }
}

/// Installs `requirements.txt` files with pip.
#[derive(Debug)]
pub struct PipInstaller {
    program: OsString,
}

impl PipInstaller {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PipInstaller {
    fn default() -> Self {
        Self::new("pip")
    }
}

impl DependencyInstaller for PipInstaller {
    /// Runs pip with inherited stdio so its progress stays visible.
    fn install_requirements(&self, requirements: &Path) -> Result<(), HostError> {
        let program = self.program.to_string_lossy();
        tracing::debug!(requirements = %requirements.display(), "installing requirements");

        let status = Command::new(&self.program)
            .arg("install")
            .arg("-r")
            .arg(requirements)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| HostError::new(format!("failed to run {program}: {e}")))?;

        if !status.success() {
            return Err(HostError::new(match status.code() {
                Some(code) => format!("{program} exited with status {code}"),
                None => format!("{program} was terminated by a signal"),
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pip_missing_program() {
        let temp = TempDir::new().unwrap();
        let installer = PipInstaller::new(temp.path().join("no-such-pip"));
        let err = installer
            .install_requirements(&temp.path().join("requirements.txt"))
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to run"), "got: {err}");
    }

    #[cfg(unix)]
    #[test]
    fn test_pip_nonzero_exit() {
        let temp = TempDir::new().unwrap();
        let installer = PipInstaller::new("false");
        let err = installer
            .install_requirements(&temp.path().join("requirements.txt"))
            .unwrap_err();
        assert_eq!(err.to_string(), "false exited with status 1");
    }

    #[cfg(unix)]
    #[test]
    fn test_pip_success() {
        let temp = TempDir::new().unwrap();
        PipInstaller::new("true")
            .install_requirements(&temp.path().join("requirements.txt"))
            .unwrap();
    }

    #[test]
    fn test_log_host_accepts_everything() {
        let host = LogHost;
        host.reload_all().unwrap();
        host.activate("weather").unwrap();
    }
}
