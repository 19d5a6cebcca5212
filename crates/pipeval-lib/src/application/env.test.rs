use super::*;

fn env_config(vars: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_variables_keeps_requested_color() {
    let config = env_config(&[]);
    assert_eq!(config.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
    assert_eq!(
        config.apply_color_config(ColorChoice::Always),
        ColorChoice::Always
    );
}

#[test]
fn test_no_color_environment_variable() {
    let config = env_config(&[("NO_COLOR", "1")]);
    assert_eq!(config.no_color.as_deref(), Some("1"));
    assert_eq!(config.apply_color_config(ColorChoice::Auto), ColorChoice::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let config = env_config(&[("NO_COLOR", "")]);
    assert_eq!(config.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
}

#[test]
fn test_force_color_environment_variable() {
    let config = env_config(&[("FORCE_COLOR", "1")]);
    assert_eq!(
        config.apply_color_config(ColorChoice::Auto),
        ColorChoice::Always
    );

    let config = env_config(&[("FORCE_COLOR", "false")]);
    assert_eq!(
        config.apply_color_config(ColorChoice::Always),
        ColorChoice::Never
    );
}

#[test]
fn test_environment_variable_precedence() {
    let config = env_config(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);

    // FORCE_COLOR wins over NO_COLOR and CLICOLOR
    assert_eq!(
        config.apply_color_config(ColorChoice::Auto),
        ColorChoice::Always
    );
}

#[test]
fn test_ci_environment_variable() {
    let config = env_config(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(
        config.apply_color_config(ColorChoice::Always),
        ColorChoice::Never
    );
}

#[test]
fn test_unrelated_variables_are_ignored() {
    let config = env_config(&[("PATH", "/usr/bin"), ("PIPEVAL_PORT", "9000")]);
    assert!(config.no_color.is_none());
    assert!(config.ci.is_none());
}
