//! Configuration management for Clinica.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Clinica uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CLINICA_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clinica::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("clinica.toml")?;
//!
//! println!("Clinic: {}", config.application.name);
//! println!("Id strategy: {:?}", config.identifiers.strategy);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (name, log level)
//! - [`IdentifierConfig`] - Id generation strategy
//! - [`LoggingConfig`] - File logging
//! - [`SampleDataConfig`] - Demo data seeding
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "clinica"
//! log_level = "info"
//!
//! [identifiers]
//! strategy = "random"
//!
//! [logging]
//! local_enabled = true
//! local_path = "${CLINICA_LOG_DIR}"
//! local_rotation = "daily"
//!
//! [sample_data]
//! enabled = true
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str, load_config_or_default};
pub use schema::{
    ApplicationConfig, ClinicConfig, IdStrategy, IdentifierConfig, LoggingConfig,
    SampleDataConfig,
};
