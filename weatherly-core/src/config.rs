use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::{model::Coordinates, state::unit::TemperatureUnit};

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "WEATHERLY_API_KEY";

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";

const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Time of day for the daily forecast reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    pub hour: u8,
    pub minute: u8,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// temperature_unit = "fahrenheit"
///
/// [home]
/// lat = 51.5
/// lon = -0.12
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Unit the app starts in.
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    /// Quiet period after a keystroke before suggestions are fetched.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Position reported by the command-line location service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<Coordinates>,

    /// Scheduled daily reminder; absent when reminders are off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderConfig>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_api_base_url(),
            temperature_unit: TemperatureUnit::default(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            home: None,
            reminder: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherly", "weatherly")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, falling back to the stored one.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_with_override(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_override(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").expect("empty config parses");

        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.temperature_unit, TemperatureUnit::Celsius);
        assert_eq!(cfg.search_debounce(), Duration::from_millis(300));
        assert!(cfg.home.is_none());
        assert!(cfg.reminder.is_none());
    }

    #[test]
    fn parses_full_file() {
        let cfg: Config = toml::from_str(
            r#"
            api_key = "KEY"
            temperature_unit = "fahrenheit"
            search_debounce_ms = 150

            [home]
            lat = 51.5
            lon = -0.12

            [reminder]
            hour = 7
            minute = 30
            "#,
        )
        .expect("config parses");

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.temperature_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(cfg.search_debounce_ms, 150);
        assert_eq!(cfg.home, Some(Coordinates::new(51.5, -0.12)));
        assert_eq!(cfg.reminder, Some(ReminderConfig { hour: 7, minute: 30 }));
    }

    #[test]
    fn environment_key_wins_over_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(
            cfg.api_key_with_override(Some("ENV_KEY".into())).as_deref(),
            Some("ENV_KEY")
        );
        assert_eq!(cfg.api_key_with_override(Some("  ".into())).as_deref(), Some("FILE_KEY"));
        assert_eq!(cfg.api_key_with_override(None).as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());
        assert_eq!(cfg.api_key_with_override(None), None);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.reminder = Some(ReminderConfig::default());
        cfg.save_to(&path).expect("save succeeds");

        let loaded = Config::load_from(&path).expect("load succeeds");
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.reminder, Some(ReminderConfig { hour: 8, minute: 0 }));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load succeeds");
        assert!(cfg.api_key.is_none());
    }
}
