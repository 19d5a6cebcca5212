//! Configuration loading
//!
//! Coordinates loading configuration from the various sources into a single
//! validated `CliConfig`.

use crate::primitives::ConfigError;
use clap::Parser;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};

/// Environment files consulted in order; earlier files win
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        // .env files must be in the process environment before clap reads `env = ...`
        load_env_files()?;

        let cli = Cli::parse();
        let env_config = EnvironmentConfig::load()?;

        Self::resolve(cli, &env_config)
    }

    /// Layer parsed CLI values over defaults adjusted by standard env vars
    pub fn resolve(cli: Cli, env_config: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();
        config.color = env_config.apply_color_config(config.color);

        let mut config = config.merge_with(cli.config);
        config.validate()?;

        Ok(Self {
            app_config: config,
            command: cli.command,
        })
    }
}

/// Load `.env.local` and `.env` if present, never overriding real env vars
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
