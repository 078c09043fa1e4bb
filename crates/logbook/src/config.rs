//! Configuration management for logbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::calendar::DisplayRange;
use crate::date::DateKey;
use crate::duties::DEFAULT_STORAGE_KEY;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "logbook";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "logbook.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "LOGBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LOGBOOK_`, sections split on `__`,
///    e.g. `LOGBOOK_RANGE__START`)
/// 2. TOML config file at `~/.config/logbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display range configuration.
    pub range: RangeConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// The span of days the logbook covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// First day, inclusive.
    pub start: DateKey,
    /// Last day, inclusive.
    pub end: DateKey,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/logbook/logbook.db`
    pub database_path: Option<PathBuf>,
    /// Record key the duty map is stored under.
    pub key: String,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start: DateKey::new(internship_day(2025, 10, 6)),
            end: DateKey::new(internship_day(2026, 4, 10)),
        }
    }
}

/// Days of the default internship period.
fn internship_day(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration, reading `config_path` or the default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&config_file))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.range.start > self.range.end {
            return Err(Error::ConfigValidation {
                message: format!(
                    "range.start ({}) cannot be after range.end ({})",
                    self.range.start, self.range.end
                ),
            });
        }

        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.key must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// The configured display range.
    ///
    /// # Errors
    ///
    /// Returns an error if the range ends before it starts.
    pub fn display_range(&self) -> Result<DisplayRange> {
        DisplayRange::new(self.range.start, self.range.end)
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_range_is_internship() {
        let config = Config::default();
        assert_eq!(config.range.start, key("2025-10-06"));
        assert_eq!(config.range.end, key("2026-04-10"));
    }

    #[test]
    fn test_default_storage_config() {
        let storage = StorageConfig::default();
        assert!(storage.database_path.is_none());
        assert_eq!(storage.key, "internshipLogbook");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_inverted_range() {
        let mut config = Config::default();
        config.range.start = key("2026-05-01");

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("range.start"));
    }

    #[test]
    fn test_validate_empty_key() {
        let mut config = Config::default();
        config.storage.key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("storage.key"));
    }

    #[test]
    fn test_display_range() {
        let range = Config::default().display_range().unwrap();
        assert_eq!(range.start(), key("2025-10-06"));
        assert_eq!(range.end(), key("2026-04-10"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("logbook.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));
        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("logbook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file("/nonexistent/config.toml")),
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[range]
start = "2026-01-05"
end = "2026-06-30"

[storage]
key = "summerLogbook"
"#,
        )
        .unwrap();

        let config = Config::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&path)),
        )
        .unwrap();
        assert_eq!(config.range.start, key("2026-01-05"));
        assert_eq!(config.range.end, key("2026-06-30"));
        assert_eq!(config.storage.key, "summerLogbook");
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[range]\nstart = \"2026-1-5\"\n").unwrap();

        let result = Config::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&path)),
        );
        assert!(matches!(result, Err(Error::ConfigLoad(_))));
    }

    #[test]
    fn test_load_rejects_inverted_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[range]\nstart = \"2026-06-01\"\nend = \"2026-01-01\"\n").unwrap();

        let result = Config::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&path)),
        );
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"start\":\"2025-10-06\""));
        assert!(json.contains("internshipLogbook"));
    }
}
