//! CLI configuration loading.
//!
//! Settings live in `~/.timecard/config.json`. A missing or corrupt file
//! degrades to defaults rather than failing the command; command-line flags
//! override whatever the file says.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Print reports as JSON by default.
    pub json: bool,
    /// Write logs to ~/.timecard/logs/ instead of stderr.
    pub log_to_file: bool,
}

/// Returns the timecard data directory (~/.timecard).
pub fn timecard_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".timecard"))
}

/// Returns the path to the CLI configuration file.
pub fn config_path() -> Option<PathBuf> {
    timecard_dir().map(|d| d.join("config.json"))
}

/// Loads the configuration, returning defaults if the file doesn't exist.
pub fn load() -> CliConfig {
    config_path()
        .map(|p| load_from(&p))
        .unwrap_or_default()
}

/// Loads from an explicit path. Used directly by tests for isolation.
pub fn load_from(path: &Path) -> CliConfig {
    fs_err::read_to_string(path)
        .ok()
        .and_then(|c| serde_json::from_str(&c).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.json"));
        assert!(!config.json);
        assert!(!config.log_to_file);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs_err::write(&path, "{ not json").unwrap();

        let config = load_from(&path);
        assert!(!config.json);
    }

    #[test]
    fn loads_partial_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs_err::write(&path, r#"{"json": true}"#).unwrap();

        let config = load_from(&path);
        assert!(config.json);
        assert!(!config.log_to_file);
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs_err::write(&path, r#"{"log_to_file": true, "theme": "dark"}"#).unwrap();

        let config = load_from(&path);
        assert!(config.log_to_file);
    }
}
