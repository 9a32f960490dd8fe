//! Configuration schema types
//!
//! This module defines the configuration structure for Clinica. Every section
//! has defaults, so an empty file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};

/// How ids are generated for entities created without one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random, uuid-backed suffixes (`PAT1F3A9C0B`)
    #[default]
    Random,
    /// Per-kind counters (`PAT00000001`), for demos and reproducible runs
    Sequential,
}

impl std::str::FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(format!(
                "Invalid identifiers.strategy '{}'. Must be one of: random, sequential",
                other
            )),
        }
    }
}

/// Main Clinica configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Id generation settings
    #[serde(default)]
    pub identifiers: IdentifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Sample data seeding
    #[serde(default)]
    pub sample_data: SampleDataConfig,
}

impl ClinicConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Display name used in reports
    #[serde(default = "default_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("application.name cannot be empty".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Id generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifierConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

/// Sample data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDataConfig {
    /// Seed three doctors and three patients when the clinic starts
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SampleDataConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// Default value functions
fn default_name() -> String {
    "clinica".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClinicConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.name, "clinica");
        assert_eq!(config.identifiers.strategy, IdStrategy::Random);
        assert!(!config.logging.local_enabled);
        assert!(config.sample_data.enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ClinicConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.log_level = "debug".to_string();
        config.name = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        config.local_rotation = "hourly".to_string();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("local_rotation"));

        config.local_rotation = "daily".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_id_strategy_parsing() {
        assert_eq!("Sequential".parse::<IdStrategy>(), Ok(IdStrategy::Sequential));
        assert_eq!(" random ".parse::<IdStrategy>(), Ok(IdStrategy::Random));
        assert!("uuid".parse::<IdStrategy>().is_err());

        let config: ClinicConfig = toml::from_str("[identifiers]\nstrategy = \"sequential\"").unwrap();
        assert_eq!(config.identifiers.strategy, IdStrategy::Sequential);
    }
}
