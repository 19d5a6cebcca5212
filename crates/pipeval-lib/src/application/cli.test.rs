use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_parses() {
    let cli = Cli::try_parse_from(["pipeval"]).unwrap();
    assert_eq!(cli.command, None);
    assert_eq!(cli.config.port, 8000);
}

#[test]
fn test_global_options_before_subcommand() {
    let cli = Cli::try_parse_from(["pipeval", "--port", "9001", "--log-format", "json", "serve"])
        .unwrap();
    assert_eq!(cli.command, Some(Commands::Serve));
    assert_eq!(cli.config.port, 9001);
    assert_eq!(cli.config.log_format, crate::primitives::LogFormat::Json);
}

#[test]
fn test_check_requires_file() {
    assert!(Cli::try_parse_from(["pipeval", "check"]).is_err());

    let cli = Cli::try_parse_from(["pipeval", "check", "pipeline.json"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Check {
            file: PathBuf::from("pipeline.json")
        })
    );
}

#[test]
fn test_cli_config_from_cli() {
    let cli = Cli::try_parse_from(["pipeval", "--color", "never", "version"]).unwrap();
    let config = CliConfig::from(cli);
    assert_eq!(config.command, Some(Commands::Version));
    assert_eq!(config.app_config.color, crate::primitives::ColorChoice::Never);
}

#[test]
fn test_version_skips_logging() {
    assert!(!Commands::Version.wants_logging());
    assert!(Commands::Serve.wants_logging());
}
