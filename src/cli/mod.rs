//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Clinica using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Clinica - clinical records manager
#[derive(Parser, Debug)]
#[command(name = "clinica")]
#[command(version, about, long_about = None)]
#[command(author = "Clinica Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "clinica.toml", env = "CLINICA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLINICA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Run a walkthrough against the sample data and print statistics
    Demo(commands::demo::DemoArgs),
}

impl Cli {
    /// Execute the selected command, returning the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Init(args) => args.execute(),
            Commands::ValidateConfig(args) => args.execute(&self.config),
            Commands::Demo(args) => args.execute(&self.config),
        }
    }
}
