//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ClinicConfig;
use crate::domain::errors::ClinicError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ClinicConfig
/// 4. Applies environment variable overrides (CLINICA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use clinica::config::loader::load_config;
///
/// let config = load_config("clinica.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ClinicConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClinicError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ClinicError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads the configuration file if it exists, defaults otherwise
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ClinicConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = ClinicConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn load_config_from_str(contents: &str) -> Result<ClinicConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ClinicConfig = toml::from_str(&contents)
        .map_err(|e| ClinicError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &ClinicConfig) -> Result<()> {
    config.validate().map_err(|e| {
        ClinicError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ClinicError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CLINICA_* prefix
///
/// Environment variables follow the pattern: CLINICA_<SECTION>_<KEY>,
/// for example CLINICA_APPLICATION_LOG_LEVEL or CLINICA_IDENTIFIERS_STRATEGY.
fn apply_env_overrides(config: &mut ClinicConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CLINICA_APPLICATION_NAME") {
        config.application.name = val;
    }
    if let Ok(val) = std::env::var("CLINICA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Identifier overrides
    if let Ok(val) = std::env::var("CLINICA_IDENTIFIERS_STRATEGY") {
        config.identifiers.strategy = val.parse().map_err(ClinicError::Configuration)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CLINICA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CLINICA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CLINICA_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    // Sample data overrides
    if let Ok(val) = std::env::var("CLINICA_SAMPLE_DATA_ENABLED") {
        config.sample_data.enabled = val.parse().unwrap_or(true);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdStrategy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CLINICA_TEST_CLINIC_NAME", "Riverside");
        let input = "name = \"${CLINICA_TEST_CLINIC_NAME}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "name = \"Riverside\"\n");
        std::env::remove_var("CLINICA_TEST_CLINIC_NAME");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CLINICA_TEST_MISSING_VAR");
        let input = "name = \"${CLINICA_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CLINICA_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# name = \"${CLINICA_TEST_NEVER_SET}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-clinica.toml");
        assert!(matches!(result, Err(ClinicError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
name = "riverside-clinic"
log_level = "debug"

[identifiers]
strategy = "sequential"

[logging]
local_enabled = false
local_rotation = "hourly"

[sample_data]
enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.name, "riverside-clinic");
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.identifiers.strategy, IdStrategy::Sequential);
        assert_eq!(config.logging.local_rotation, "hourly");
        assert!(!config.sample_data.enabled);
    }

    #[test]
    fn test_load_config_invalid_rotation() {
        let err = load_config_from_str("[logging]\nlocal_rotation = \"weekly\"").unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_load_config_malformed_toml() {
        let err = load_config_from_str("[application\nname = 1").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
