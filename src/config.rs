//! Configuration module
//!
//! TOML configuration, by default at `~/.config/parking-service/config.toml`.
//! Every section is optional; a missing file yields the defaults.
//!
//! ```toml
//! [storage]
//! backend = "file"          # "file" | "memory"
//! data_dir = "/var/lib/parking-service"
//!
//! [reminders]
//! lead_time_minutes = 30
//!
//! [extensions]
//! allowed_minutes = [30, 60, 120, 180]
//!
//! [logging]
//! level = "info"
//! format = "text"           # "text" | "json"
//!
//! [service]
//! shutdown_timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::reservation::policy::{
    DEFAULT_EXTENSION_OPTIONS_MINUTES, DEFAULT_REMINDER_LEAD_MINUTES,
};
use crate::domain::ReservationPolicy;
use crate::support::errors::ConfigError;

const APP_DIR: &str = "parking-service";

/// Default config location: `<config dir>/parking-service/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemindersConfig {
    pub lead_time_minutes: i64,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            lead_time_minutes: DEFAULT_REMINDER_LEAD_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    pub allowed_minutes: Vec<i64>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            allowed_minutes: DEFAULT_EXTENSION_OPTIONS_MINUTES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upper bound on the final flush during shutdown
    pub shutdown_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub reminders: RemindersConfig,
    pub extensions: ExtensionsConfig,
    pub logging: LoggingConfig,
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load from `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reminders.lead_time_minutes < 0 {
            return Err(ConfigError::Invalid(format!(
                "reminders.lead_time_minutes must be >= 0, got {}",
                self.reminders.lead_time_minutes
            )));
        }
        if self.extensions.allowed_minutes.is_empty() {
            return Err(ConfigError::Invalid(
                "extensions.allowed_minutes must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self.extensions.allowed_minutes.iter().find(|m| **m <= 0) {
            return Err(ConfigError::Invalid(format!(
                "extensions.allowed_minutes must be positive, got {}",
                bad
            )));
        }
        match self.logging.format.to_lowercase().as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be \"text\" or \"json\", got {:?}",
                other
            ))),
        }
    }

    pub fn policy(&self) -> ReservationPolicy {
        ReservationPolicy::from_minutes(
            self.reminders.lead_time_minutes,
            &self.extensions.allowed_minutes,
        )
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn defaults_match_builtin_policy() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.policy(), ReservationPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [reminders]
            lead_time_minutes = 15

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.policy().reminder_lead, Duration::minutes(15));
        assert_eq!(config.extensions.allowed_minutes, vec![30, 60, 120, 180]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            AppConfig::from_toml("[extensions]\nallowed_minutes = []"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[extensions]\nallowed_minutes = [30, -5]"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[logging]\nformat = \"xml\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[storage]\nbackend = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.reminders.lead_time_minutes, 30);
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/tmp/parking\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/parking"));
    }
}
