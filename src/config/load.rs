use crate::config::types::{Config, DEFAULT_SETTINGS_FILE, UserSettings};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

impl Config {
    /// Loads `settings.json` from the working directory, or defaults when it
    /// does not exist.
    pub fn new() -> Result<Self> {
        let path = Path::new(DEFAULT_SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Loads settings from an explicit path, which must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = Self::load_settings(path)?;
        debug!("loaded settings from {}", path.display());
        Ok(Self { settings })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
