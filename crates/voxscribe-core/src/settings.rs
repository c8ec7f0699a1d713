//! Persisted user settings.
//!
//! Stored as JSON under the user config dir. Loading is tolerant: a
//! missing or unreadable file yields defaults so a fresh install works
//! without any setup step.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Saved backend base URL (flag and environment take precedence)
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Preferred microphone device name (None = system default)
    #[serde(default)]
    pub microphone_device: Option<String>,
}

impl Settings {
    /// Directory holding settings and session files.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("voxscribe"))
    }

    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings, falling back to defaults on any problem.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                crate::verbose!("Ignoring malformed settings file: {e}");
                Self::default()
            }
        }
    }

    /// Persist settings to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, contents).context("Failed to write settings file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert!(settings.backend_url.is_none());
        assert!(settings.microphone_device.is_none());
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let settings = Settings::load_from(&path);
        assert!(settings.backend_url.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            backend_url: Some("http://localhost:5000".to_string()),
            microphone_device: Some("USB Microphone".to_string()),
        };
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(&path);
        assert_eq!(reloaded.backend_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(reloaded.microphone_device.as_deref(), Some("USB Microphone"));
    }
}
