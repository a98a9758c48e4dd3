use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::TestMode;
use crate::session::typing::{DEFAULT_DURATION_SECS, is_valid_duration};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_duration_secs() -> u32 {
    DEFAULT_DURATION_SECS
}
fn default_mode() -> String {
    TestMode::default().as_str().to_string()
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            mode: default_mode(),
            theme: default_theme(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typerush")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn themes_dir() -> PathBuf {
        Self::config_dir().join("themes")
    }

    pub fn log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typerush")
            .join("typerush.log")
    }

    /// Reset values a hand-edited file may have left out of range.
    pub fn normalize(&mut self) {
        if !is_valid_duration(self.duration_secs) {
            self.duration_secs = default_duration_secs();
        }
        match self.mode.parse::<TestMode>() {
            Ok(mode) => self.mode = mode.as_str().to_string(),
            Err(_) => self.mode = default_mode(),
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
    }

    pub fn test_mode(&self) -> TestMode {
        self.mode.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.mode, "words");
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
duration_secs = 60
theme = "space-night"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.duration_secs, 60);
        assert_eq!(config.theme, "space-night");
        assert_eq!(config.mode, "words");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_normalize_out_of_range_duration_resets() {
        let mut config = Config {
            duration_secs: 0,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.duration_secs, 30);

        config.duration_secs = 10_000;
        config.normalize();
        assert_eq!(config.duration_secs, 30);

        config.duration_secs = 45;
        config.normalize();
        assert_eq!(config.duration_secs, 45);
    }

    #[test]
    fn test_normalize_mode() {
        let mut config = Config {
            mode: "Punctuation".to_string(),
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.mode, "punctuation");
        assert_eq!(config.test_mode(), TestMode::Punctuation);

        config.mode = "klingon".to_string();
        config.normalize();
        assert_eq!(config.mode, "words");
    }

    #[test]
    fn test_mode_falls_back_without_normalize() {
        let config = Config {
            mode: "nope".to_string(),
            ..Config::default()
        };
        assert_eq!(config.test_mode(), TestMode::Words);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            duration_secs: 15,
            mode: "numbers".to_string(),
            theme: "space-night".to_string(),
            log_level: "debug".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "duration_secs = 999\nmode = \"emoji\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.duration_secs, 30);
        assert_eq!(config.mode, "words");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "duration_secs = \"thirty\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
