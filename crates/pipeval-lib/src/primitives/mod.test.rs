use super::*;

// =============================================================================
// VALUE ENUM PARSING
// =============================================================================

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");

                let primary_name = possible_value.get_name();
                let parsed: $enum_type = primary_name
                    .parse()
                    .unwrap_or_else(|_| panic!("Primary name '{}' should parse", primary_name));
                assert_eq!(parsed, *variant, "Round-trip should preserve variant");
            }
        }
    };
}

macro_rules! test_fromstr_aliases {
    ($enum_type:ty, $test_name:ident, $expected_mappings:expr) => {
        #[test]
        fn $test_name() {
            let mappings: &[(&str, $enum_type)] = &$expected_mappings;

            for (input, expected) in mappings {
                let parsed: Result<$enum_type, _> = input.parse();
                assert_eq!(
                    parsed.ok(),
                    Some(*expected),
                    "Wrong variant for input '{}'",
                    input
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorChoice, test_color_choice_completeness);

test_fromstr_aliases!(
    LogLevel,
    test_log_level_aliases,
    [
        ("error", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warning", LogLevel::Warning),
        ("info", LogLevel::Info),
        ("debugging", LogLevel::Debug),
        ("verbose", LogLevel::Trace),
    ]
);

test_fromstr_aliases!(
    LogFormat,
    test_log_format_aliases,
    [
        ("text", LogFormat::Text),
        ("plain", LogFormat::Text),
        ("JSON", LogFormat::Json),
        ("pretty", LogFormat::Pretty),
    ]
);

test_fromstr_aliases!(
    ColorChoice,
    test_color_choice_aliases,
    [
        ("auto", ColorChoice::Auto),
        ("detect", ColorChoice::Auto),
        ("force", ColorChoice::Always),
        ("off", ColorChoice::Never),
    ]
);

#[test]
fn test_unknown_value_reports_parse_error() {
    let err = "chartreuse".parse::<ColorChoice>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "chartreuse");
            assert_eq!(reason, "invalid color choice");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// BEHAVIOR
// =============================================================================

#[test]
fn test_log_level_from_verbosity_boundary_conditions() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(u8::MAX), LogLevel::Trace);
}

#[test]
fn test_log_level_directives() {
    assert_eq!(LogLevel::Error.as_directive(), "error");
    assert_eq!(LogLevel::Warning.as_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_directive(), "trace");
}

#[test]
fn test_color_choice_resolution() {
    assert!(ColorChoice::Always.resolve(false));
    assert!(!ColorChoice::Never.resolve(true));
    assert!(ColorChoice::Auto.resolve(true));
    assert!(!ColorChoice::Auto.resolve(false));
}
