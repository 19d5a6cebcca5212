use super::*;
use crate::primitives::ColorChoice;

fn env_with(vars: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_resolve_defaults() {
    let cli = Cli::try_parse_from(["pipeval"]).unwrap();
    let config = CliConfig::resolve(cli, &env_with(&[])).unwrap();
    assert_eq!(config.command, None);
    assert_eq!(config.app_config.port, 8000);
    assert_eq!(config.app_config.color, ColorChoice::Auto);
}

#[test]
fn test_resolve_applies_no_color() {
    let cli = Cli::try_parse_from(["pipeval"]).unwrap();
    let config = CliConfig::resolve(cli, &env_with(&[("NO_COLOR", "1")])).unwrap();
    assert_eq!(config.app_config.color, ColorChoice::Never);
}

#[test]
fn test_resolve_cli_color_beats_environment() {
    let cli = Cli::try_parse_from(["pipeval", "--color", "always"]).unwrap();
    let config = CliConfig::resolve(cli, &env_with(&[("NO_COLOR", "1")])).unwrap();
    assert_eq!(config.app_config.color, ColorChoice::Always);
}

#[test]
fn test_resolve_validates_result() {
    let cli = Cli::try_parse_from(["pipeval", "--host", "example.invalid"]).unwrap();
    let result = CliConfig::resolve(cli, &env_with(&[]));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidListenAddress { .. })
    ));
}
