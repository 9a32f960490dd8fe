//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "clinica.toml")]
    pub output: String,

    /// Include comments describing every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Clinica configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: clinica validate-config");
                println!("  3. Run the walkthrough: clinica demo");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Clinica Configuration File

[application]
name = "clinica"
log_level = "info"

[identifiers]
strategy = "random"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"

[sample_data]
enabled = true
"#
        .to_string()
    }

    /// Generate configuration with comments for every setting
    fn generate_config_with_examples() -> String {
        r#"# Clinica Configuration File
#
# Values may reference environment variables with ${VAR_NAME}; every
# setting can also be overridden with CLINICA_<SECTION>_<KEY>, for example
# CLINICA_APPLICATION_LOG_LEVEL=debug.

[application]
# Name shown in reports
name = "clinica"

# Log level: trace | debug | info | warn | error
# RUST_LOG, when set, takes precedence
log_level = "info"

[identifiers]
# How ids are generated for entities created without one:
#   random     - PAT1F3A9C0B (8 uppercase hex characters from a v4 uuid)
#   sequential - PAT00000001 (per-kind counters, reproducible runs)
strategy = "random"

[logging]
# Write JSON logs to rotating files in addition to the console
local_enabled = false

# Directory for log files
local_path = "logs"

# Rotation: daily | hourly
local_rotation = "daily"

[sample_data]
# Register DOC001-DOC003 and PAT001-PAT003 when the clinic starts
enabled = true
"#
        .to_string()
    }
}
