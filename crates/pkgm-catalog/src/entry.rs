//! One package record of a metadata descriptor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A package as listed in a `repo.json` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique package identifier, also the install directory name.
    pub pkg_name: String,
    /// Human-readable display name.
    pub name: String,
    pub description: String,
    pub version: String,
    /// Clone source of the package.
    pub repo: String,
    /// Plugins to activate right after installation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_enable: Vec<String>,
}

/// `pkg_name | version | description`, the listing line format.
impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.pkg_name, self.version, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enable_is_optional() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"pkg_name":"weather","name":"Weather","description":"Shows current weather",
                "version":"1.0","repo":"https://example.test/weather.git"}"#,
        )
        .unwrap();
        assert!(entry.default_enable.is_empty());
    }

    #[test]
    fn test_display_is_listing_line() {
        let entry = CatalogEntry {
            pkg_name: "weather".to_string(),
            name: "Weather".to_string(),
            description: "Shows current weather".to_string(),
            version: "1.0".to_string(),
            repo: "https://example.test/weather.git".to_string(),
            default_enable: vec![],
        };
        assert_eq!(entry.to_string(), "weather | 1.0 | Shows current weather");
    }
}
