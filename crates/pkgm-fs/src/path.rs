//! Package name validation

use crate::{Error, Result};

/// Check that `name` can be used as a single directory name under the
/// install root.
///
/// Rejects empty names, path separators, `.`/`..`, and hidden names (the
/// leading dot is reserved for staging directories).
pub fn validate_pkg_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else if name == "." || name == ".." {
        Some("name is a relative path component")
    } else if name.starts_with('.') {
        Some("name starts with '.'")
    } else if name.chars().any(char::is_control) {
        Some("name contains control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
