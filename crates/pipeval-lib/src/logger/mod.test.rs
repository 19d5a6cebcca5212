use super::*;

#[test]
fn test_filter_directives_scope_our_crates_to_level() {
    let directives = filter_directives(LogLevel::Debug);
    assert!(directives.contains("pipeval=debug"));
    assert!(directives.contains("pipeval_lib=debug"));
    assert!(directives.contains("tower_http=debug"));
    assert!(directives.ends_with(",debug"));
}

#[test]
fn test_filter_directives_quiet_transport_internals() {
    let directives = filter_directives(LogLevel::Trace);
    for target in QUIET_TARGETS {
        assert!(
            directives.contains(&format!("{}=warn", target)),
            "{} should be capped at warn",
            target
        );
    }
}

#[test]
fn test_filter_directives_parse_as_env_filter() {
    for verbosity in 0..=4 {
        let directives = filter_directives(LogLevel::from_verbosity(verbosity));
        assert!(
            EnvFilter::try_new(&directives).is_ok(),
            "invalid directives: {}",
            directives
        );
    }
}

#[test]
fn test_second_init_is_rejected() {
    let config = LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        ansi: false,
    };

    // Whichever call runs first may succeed; the next must not
    let _ = Logger::init(config.clone());
    assert!(Logger::init(config).is_err());

    if let Some(logger) = Logger::global() {
        assert_eq!(logger.config().level, LogLevel::Error);
        assert!(Logger::is_initialized());
    }
}
