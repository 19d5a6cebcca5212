//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use axum::http::HeaderValue;
use clap::Parser;
use serde::Deserialize;
use std::io::IsTerminal;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default configuration values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: &str = "8000";
    pub const ALLOWED_ORIGINS: &str = "http://localhost:3000"; // Editor dev server
    pub const LOG_LEVEL: &str = "2"; // Info: one line per request
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Origin value that mirrors whatever origin the browser sends
pub const ANY_ORIGIN: &str = "*";

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn host() -> String {
        defaults::HOST.to_string()
    }

    pub fn port() -> u16 {
        8000
    }

    pub fn allowed_origins() -> Vec<String> {
        defaults::ALLOWED_ORIGINS
            .split(',')
            .map(str::to_string)
            .collect()
    }

    pub fn log_level() -> u8 {
        2
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorChoice {
        ColorChoice::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "PIPEVAL_HOST", default_value = defaults::HOST)]
    #[serde(default = "default_fns::host")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = "PIPEVAL_PORT", default_value = defaults::PORT)]
    #[serde(default = "default_fns::port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser (comma separated, `*` for any)
    #[arg(
        long,
        env = "PIPEVAL_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = defaults::ALLOWED_ORIGINS
    )]
    #[serde(default = "default_fns::allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "PIPEVAL_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, pretty)
    #[arg(long, env = "PIPEVAL_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "PIPEVAL_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "PIPEVAL_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_fns::host(),
            port: default_fns::port(),
            allowed_origins: default_fns::allowed_origins(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, resolving color against the chosen stream
    pub fn to_logger_config(&self) -> LoggerConfig {
        let is_terminal = match self.log_output {
            LogOutput::Stderr => std::io::stderr().is_terminal(),
            LogOutput::Stdout => std::io::stdout().is_terminal(),
        };

        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.color.resolve(is_terminal),
        }
    }

    /// Socket address the server listens on
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = match self.host.as_str() {
            "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
            host => host
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::InvalidListenAddress {
                    address: host.to_string(),
                    reason: e.to_string(),
                })?,
        };

        Ok(SocketAddr::new(ip, self.port))
    }

    /// Whether any browser origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == ANY_ORIGIN)
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.host != default_fns::host() {
            self.host = other.host;
        }
        if other.port != default_fns::port() {
            self.port = other.port;
        }
        if other.allowed_origins != default_fns::allowed_origins() {
            self.allowed_origins = other.allowed_origins;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorChoice::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        // Tolerate "a, b" and trailing commas from env files
        self.allowed_origins = self
            .allowed_origins
            .iter()
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        for origin in &self.allowed_origins {
            if origin != ANY_ORIGIN && HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::InvalidOrigin {
                    origin: origin.clone(),
                });
            }
        }

        self.listen_addr()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
