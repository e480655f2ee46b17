//! Configuration management for sightread

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Name used for the platform config and data directories
pub const APP_NAME: &str = "sightread";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Learner profiles offered for switching
    pub profiles: Vec<String>,

    /// Profile opened at startup
    pub default_profile: String,

    /// Word list to practise instead of the built-in sight words
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            profiles: vec!["learner".to_string()],
            default_profile: "learner".to_string(),
            vocabulary_path: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", APP_NAME).context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", APP_NAME).context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("sightread.log"))
    }

    /// Profiles to cycle through, always including the default profile
    pub fn profile_list(&self) -> Vec<String> {
        let mut profiles = self.profiles.clone();
        if !profiles.contains(&self.default_profile) {
            profiles.insert(0, self.default_profile.clone());
        }
        let mut seen = HashSet::new();
        profiles.retain(|p| !p.trim().is_empty() && seen.insert(p.clone()));
        profiles
    }

    /// Profile after `current` in the switch order, wrapping around
    pub fn next_profile(&self, current: &str) -> String {
        let profiles = self.profile_list();
        let next = profiles
            .iter()
            .position(|p| p == current)
            .map(|i| (i + 1) % profiles.len())
            .unwrap_or(0);
        profiles.get(next).cloned().unwrap_or_else(|| current.to_string())
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        Theme::by_name(&self.theme).unwrap_or_else(Theme::tokyo_night)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_tokyo_night_theme() {
        let config = Config::default();
        assert_eq!(config.theme, "Tokyo Night");
    }

    #[test]
    fn default_config_has_one_profile() {
        let config = Config::default();
        assert_eq!(config.profile_list(), vec!["learner"]);
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("Tokyo Night"));
        assert!(!json.contains("vocabulary_path"));
    }

    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{"theme":"Tokyo Night Day","profiles":["Asha","Ravi"],"default_profile":"Asha"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, "Tokyo Night Day");
        assert_eq!(config.profile_list(), vec!["Asha", "Ravi"]);
        assert_eq!(config.vocabulary_path, None);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"theme":"x"}"#).unwrap();
        assert_eq!(config.default_profile, "learner");
    }

    #[test]
    fn default_profile_is_always_listed() {
        let config = Config {
            profiles: vec!["Ravi".into()],
            default_profile: "Asha".into(),
            ..Default::default()
        };
        assert_eq!(config.profile_list(), vec!["Asha", "Ravi"]);
    }

    #[test]
    fn next_profile_wraps() {
        let config = Config {
            profiles: vec!["Asha".into(), "Ravi".into()],
            default_profile: "Asha".into(),
            ..Default::default()
        };
        assert_eq!(config.next_profile("Asha"), "Ravi");
        assert_eq!(config.next_profile("Ravi"), "Asha");
        assert_eq!(config.next_profile("stranger"), "Asha");
    }
}
