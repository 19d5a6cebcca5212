use super::*;

#[test]
fn test_defaults_match_editor_setup() {
    let config = AppConfig::default();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
    assert_eq!(config.log_level, 2);
    assert_eq!(config.color, ColorChoice::Auto);
}

#[test]
fn test_default_fns_agree_with_clap_defaults() {
    let parsed = AppConfig::try_parse_from(["pipeval"]).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(parsed.host, defaults.host);
    assert_eq!(parsed.port, defaults.port);
    assert_eq!(parsed.allowed_origins, defaults.allowed_origins);
    assert_eq!(parsed.log_level, defaults.log_level);
}

#[test]
fn test_allowed_origins_split_on_commas() {
    let parsed = AppConfig::try_parse_from([
        "pipeval",
        "--allowed-origins",
        "http://localhost:3000,https://editor.example.com",
    ])
    .unwrap();
    assert_eq!(
        parsed.allowed_origins,
        vec!["http://localhost:3000", "https://editor.example.com"]
    );
}

#[test]
fn test_merge_takes_non_default_values() {
    let override_config = AppConfig {
        port: 9100,
        log_level: 4,
        log_format: LogFormat::Json,
        color: ColorChoice::Never,
        ..AppConfig::default()
    };

    let merged = AppConfig::default().merge_with(override_config);
    assert_eq!(merged.port, 9100);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.log_format, LogFormat::Json);
    assert_eq!(merged.color, ColorChoice::Never);
    assert_eq!(merged.host, "0.0.0.0");
}

#[test]
fn test_merge_keeps_base_when_other_is_default() {
    let base = AppConfig {
        color: ColorChoice::Never,
        ..AppConfig::default()
    };
    let merged = base.merge_with(AppConfig::default());
    assert_eq!(merged.color, ColorChoice::Never);
}

#[test]
fn test_listen_addr_parses_ipv4_ipv6_and_localhost() {
    let mut config = AppConfig::default();
    assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:8000");

    config.host = "::1".to_string();
    assert_eq!(config.listen_addr().unwrap().to_string(), "[::1]:8000");

    config.host = "localhost".to_string();
    config.port = 0;
    assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:0");
}

#[test]
fn test_validate_rejects_unparseable_host() {
    let mut config = AppConfig {
        host: "not an address".to_string(),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidListenAddress { .. })
    ));
}

#[test]
fn test_validate_normalizes_origins() {
    let mut config = AppConfig {
        allowed_origins: vec![
            " http://localhost:3000/".to_string(),
            String::new(),
            "*".to_string(),
        ],
        ..AppConfig::default()
    };
    config.validate().unwrap();
    assert_eq!(config.allowed_origins, vec!["http://localhost:3000", "*"]);
    assert!(config.allows_any_origin());
}

#[test]
fn test_validate_rejects_origin_with_control_characters() {
    let mut config = AppConfig {
        allowed_origins: vec!["http://bad\norigin".to_string()],
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidOrigin { .. })
    ));
}

#[test]
fn test_logger_config_follows_color_choice() {
    let config = AppConfig {
        log_level: 3,
        color: ColorChoice::Never,
        ..AppConfig::default()
    };
    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert!(!logger_config.ansi);

    let forced = AppConfig {
        color: ColorChoice::Always,
        ..AppConfig::default()
    };
    assert!(forced.to_logger_config().ansi);
}
