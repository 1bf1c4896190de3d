//! Collaborator interfaces the core calls into.
//!
//! The plugin host, the dependency installer, and the message sink live
//! outside the package manager. The core only sees these traits.

use std::path::Path;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The application that loads installed plugins.
pub trait PluginHost: Send + Sync {
    /// Rescan plugin locations so newly installed code becomes visible.
    fn reload_all(&self) -> Result<(), HostError>;

    /// Activate the plugin called `name`.
    fn activate(&self, name: &str) -> Result<(), HostError>;
}

/// Installs a package's own dependency requirements.
pub trait DependencyInstaller: Send + Sync {
    fn install_requirements(&self, requirements: &Path) -> Result<(), HostError>;
}

/// Where text reports are delivered to the user.
pub trait MessageSink {
    fn deliver(&self, text: &str);
}

/// Collaborator that accepts every call and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl PluginHost for NullHost {
    fn reload_all(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn activate(&self, _name: &str) -> Result<(), HostError> {
        Ok(())
    }
}

impl DependencyInstaller for NullHost {
    fn install_requirements(&self, _requirements: &Path) -> Result<(), HostError> {
        Ok(())
    }
}
