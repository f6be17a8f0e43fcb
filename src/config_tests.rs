//! Unit tests for capture configuration.

use super::*;
use rstest::rstest;
use std::io::Write;

#[test]
fn defaults_match_plain_capture() {
    let config = CaptureConfig::default();
    assert_eq!(config.level(), Level::Info);
    assert_eq!(config.policy(), Policy::Show);
}

#[rstest]
#[case(CaptureConfig::with_level(Level::Debug), Level::Debug, Policy::Show)]
#[case(CaptureConfig::with_policy(Policy::Hide), Level::Info, Policy::Hide)]
#[case(CaptureConfig::new(Level::Warn, Policy::Hide), Level::Warn, Policy::Hide)]
fn convenience_constructors(
    #[case] config: CaptureConfig,
    #[case] level: Level,
    #[case] policy: Policy,
) {
    assert_eq!(config.level(), level);
    assert_eq!(config.policy(), policy);
}

#[test]
fn builder_fills_unset_fields_with_defaults() {
    let config = CaptureConfig::builder().with_policy(Policy::Hide).build();
    assert_eq!(config, CaptureConfig::new(Level::Info, Policy::Hide));
}

#[rstest]
#[case("show", Policy::Show)]
#[case("HIDE", Policy::Hide)]
#[case("Hide", Policy::Hide)]
fn policy_parses_case_insensitively(#[case] input: &str, #[case] expected: Policy) {
    assert_eq!(input.parse::<Policy>(), Ok(expected));
}

#[test]
fn policy_rejects_unknown_names() {
    let err = "mute".parse::<Policy>().expect_err("mute is not a policy");
    assert_eq!(err.to_string(), "unknown capture policy: mute");
}

#[test]
fn ini_section_sets_both_fields() {
    let config = CaptureConfig::from_ini_str("[capture]\nlevel = debug\npolicy = hide\n")
        .expect("valid ini");
    assert_eq!(config, CaptureConfig::new(Level::Debug, Policy::Hide));
}

#[test]
fn ini_missing_keys_keep_defaults() {
    let config =
        CaptureConfig::from_ini_str("[capture]\nunrelated = 1\n").expect("valid ini");
    assert_eq!(config, CaptureConfig::default());
}

#[test]
fn ini_without_section_is_rejected() {
    let err = CaptureConfig::from_ini_str("[other]\nlevel = INFO\n")
        .expect_err("section is required");
    assert!(matches!(err, ConfigError::MissingSection { .. }));
    assert_eq!(err.to_string(), "<string> has no [capture] section");
}

#[rstest]
#[case("[capture]\nlevel = LOUD\n")]
#[case("[capture]\npolicy = sometimes\n")]
fn ini_rejects_unknown_values(#[case] text: &str) {
    let err = CaptureConfig::from_ini_str(text).expect_err("value must be rejected");
    assert!(matches!(
        err,
        ConfigError::InvalidLevel(_) | ConfigError::InvalidPolicy(_)
    ));
}

#[test]
fn ini_file_is_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "[capture]\nlevel = WARN").expect("write ini");
    let config = CaptureConfig::from_ini_file(file.path()).expect("load ini file");
    assert_eq!(config, CaptureConfig::with_level(Level::Warn));
}

#[test]
fn missing_ini_file_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.ini");
    let err = CaptureConfig::from_ini_file(&path).expect_err("file does not exist");
    assert!(matches!(err, ConfigError::NotFound { .. }));
}
