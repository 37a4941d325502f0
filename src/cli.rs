//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Repository Config - Inspect the build configuration of a repository
#[derive(Parser, Debug)]
#[command(name = "repo-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the aggregated configuration of a repository as JSON
    Show(commands::show::ShowArgs),

    /// Load and validate the configuration files of a repository
    Validate(commands::validate::ValidateArgs),

    /// Parse and normalize a module specification
    Module(commands::module::ModuleArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        match self.command {
            Commands::Show(args) => commands::show::execute(args),
            Commands::Validate(args) => commands::validate::execute(args),
            Commands::Module(args) => commands::module::execute(args),
        }
    }
}
