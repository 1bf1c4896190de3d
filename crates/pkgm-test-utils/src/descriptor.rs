//! `repo.json` builders.

use serde_json::{Value, json};

/// One package record with no `default_enable`.
pub fn package(pkg_name: &str, name: &str, description: &str, repo: &str) -> Value {
    json!({
        "pkg_name": pkg_name,
        "name": name,
        "description": description,
        "version": "1.0",
        "repo": repo,
    })
}

/// One package record activating `plugins` after install.
pub fn package_enabling(
    pkg_name: &str,
    name: &str,
    description: &str,
    repo: &str,
    plugins: &[&str],
) -> Value {
    let mut value = package(pkg_name, name, description, repo);
    value["default_enable"] = json!(plugins);
    value
}

/// A complete descriptor document listing `packages`.
pub fn descriptor(packages: Vec<Value>) -> String {
    serde_json::to_string_pretty(&json!({ "packages": packages }))
        .unwrap_or_else(|e| panic!("descriptor: failed to serialize: {e}"))
}

/// The single-package weather descriptor used across scenario tests.
pub fn weather_descriptor() -> String {
    descriptor(vec![package(
        "weather",
        "Weather",
        "Shows current weather",
        "https://example.test/weather.git",
    )])
}
