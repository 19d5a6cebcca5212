//! # pipeval Library
//!
//! Pipeline graph validation service.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types and errors
//! - [`pipeline`] - Pipeline data model and DAG validation
//! - [`logger`] - Structured logging setup
//! - [`server`] - HTTP routes, CORS, and server lifecycle
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! // Parse the command line and run the selected command
//! pipeval_lib::main().await
//! # }
//! ```

pub mod application;
pub mod logger;
pub mod pipeline;
pub mod primitives;
pub mod server;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use logger::Logger;
pub use pipeline::{Edge, Node, Pipeline, PipelineSummary, Position, is_dag};
pub use primitives::{ColorChoice, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use server::{ServerError, router};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load layered configuration (.env -> env vars -> CLI)
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
