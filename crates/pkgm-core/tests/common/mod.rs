//! Host collaborators that record what the core asked of them.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use pkgm_core::{DependencyInstaller, HostError, PluginHost};

#[derive(Debug, Default)]
pub struct HostLog {
    pub reloads: usize,
    pub activated: Vec<String>,
    pub requirements: Vec<PathBuf>,
    pub fail_activation: bool,
    pub fail_requirements: bool,
}

/// Plugin host and dependency installer in one, sharing a log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    log: Arc<Mutex<HostLog>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_activation(self) -> Self {
        self.log().fail_activation = true;
        self
    }

    pub fn failing_requirements(self) -> Self {
        self.log().fail_requirements = true;
        self
    }

    pub fn log(&self) -> MutexGuard<'_, HostLog> {
        self.log.lock().unwrap()
    }
}

impl PluginHost for RecordingHost {
    fn reload_all(&self) -> Result<(), HostError> {
        self.log().reloads += 1;
        Ok(())
    }

    fn activate(&self, name: &str) -> Result<(), HostError> {
        let mut log = self.log();
        if log.fail_activation {
            return Err(HostError::new(format!("no plugin named {name}")));
        }
        log.activated.push(name.to_string());
        Ok(())
    }
}

impl DependencyInstaller for RecordingHost {
    fn install_requirements(&self, requirements: &Path) -> Result<(), HostError> {
        let mut log = self.log();
        log.requirements.push(requirements.to_path_buf());
        if log.fail_requirements {
            return Err(HostError::new("pip exited with status 1"));
        }
        Ok(())
    }
}
