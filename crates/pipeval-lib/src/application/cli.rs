use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// pipeval CLI - pipeline graph validation service
#[derive(Debug, Clone, Parser)]
#[command(name = "pipeval")]
#[command(about = "Validate pipeline editor graphs over HTTP")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// pipeval commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available pipeval commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Summarize a pipeline JSON file without starting the server
    Check {
        /// Path to a pipeline document ({"nodes": [...], "edges": [...]})
        #[arg(help = "Pipeline JSON file to validate")]
        file: PathBuf,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Whether the command needs the global logger installed
    pub fn wants_logging(&self) -> bool {
        match self {
            Commands::Serve => true,
            Commands::Check { .. } => true,
            Commands::Version => false,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
