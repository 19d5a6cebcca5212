use clap::Parser;
use pipeval_lib::application::cli::{Cli, CliConfig};
use pipeval_lib::application::config::AppConfig;
use pipeval_lib::application::env::EnvironmentConfig;
use pipeval_lib::primitives::{ColorChoice, ConfigError, LogFormat, LogLevel};

fn no_env() -> EnvironmentConfig {
    EnvironmentConfig::default()
}

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.port, 8000);
    assert_eq!(config.color, ColorChoice::Auto);
    assert!(!config.allows_any_origin());
}

#[test]
fn test_full_command_line_resolution() {
    let cli = Cli::try_parse_from([
        "pipeval",
        "--host",
        "127.0.0.1",
        "--port",
        "0",
        "--allowed-origins",
        "https://a.example, https://b.example/",
        "--log-level",
        "3",
        "--log-format",
        "pretty",
        "serve",
    ])
    .unwrap();

    let config = CliConfig::resolve(cli, &no_env()).unwrap().app_config;
    assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:0");
    assert_eq!(
        config.allowed_origins,
        vec!["https://a.example", "https://b.example"]
    );
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert_eq!(config.to_logger_config().level, LogLevel::Debug);
}

#[test]
fn test_invalid_enum_value_is_rejected_by_cli() {
    assert!(Cli::try_parse_from(["pipeval", "--log-format", "xml"]).is_err());
    assert!(Cli::try_parse_from(["pipeval", "--port", "70000"]).is_err());
}

#[test]
fn test_config_error_messages_name_the_value() {
    let mut config = AppConfig {
        host: "nowhere".to_string(),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidListenAddress { .. }));
    assert!(err.to_string().contains("nowhere"));
}
