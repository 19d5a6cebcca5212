//! Command dispatch

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::cli::{CliConfig, Commands};
use super::config::AppConfig;
use crate::logger::Logger;
use crate::pipeline::{Pipeline, PipelineSummary};
use crate::primitives::{LogOutput, LoggerConfig};
use crate::server;

/// Execute the parsed command, serving HTTP when none is given
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let command = config.command.unwrap_or(Commands::Serve);

    if command.wants_logging() && !Logger::is_initialized() {
        Logger::init(logger_config_for(&command, &config.app_config))?;
    }

    match command {
        Commands::Serve => handle_serve(&config.app_config).await,
        Commands::Check { file } => {
            let summary = handle_check(&file).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Commands::Version => {
            println!("pipeval {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Logger settings for a command; `check` owns stdout for its summary
fn logger_config_for(command: &Commands, app_config: &AppConfig) -> LoggerConfig {
    match command {
        Commands::Check { .. } => AppConfig {
            log_output: LogOutput::Stderr,
            ..app_config.clone()
        }
        .to_logger_config(),
        _ => app_config.to_logger_config(),
    }
}

async fn handle_serve(config: &AppConfig) -> Result<()> {
    server::serve(config).await?;
    Ok(())
}

/// Summarize a pipeline stored on disk
pub async fn handle_check(file: &Path) -> Result<PipelineSummary> {
    let pipeline = Pipeline::from_json_file(file)
        .await
        .with_context(|| format!("Could not check pipeline '{}'", file.display()))?;

    let summary = pipeline.summarize();
    info!(
        file = %file.display(),
        num_nodes = summary.num_nodes,
        num_edges = summary.num_edges,
        is_dag = summary.is_dag,
        "Pipeline checked"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
