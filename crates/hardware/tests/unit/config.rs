//! # Configuration Tests
//!
//! Tests for configuration structures, deserialization, defaults, and
//! validation.

use memsim_core::SimError;
use memsim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::capture_warnings;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.general.processors, 4);
    assert_eq!(config.general.distribution, Distribution::Uniform);
    assert_eq!(config.general.seed, 1);
    assert_eq!(config.sweep.max_modules, 512);
    assert!((config.convergence.epsilon - 0.02).abs() < f64::EPSILON);
    assert_eq!(config.convergence.cycle_cap, 1_000_000);
    assert!((config.normal.std_dev - 5.0).abs() < f64::EPSILON);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config.general.processors, 4);
    assert_eq!(config.sweep.max_modules, 512);
    assert_eq!(config.convergence.cycle_cap, 1_000_000);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let json = r#"{ "general": { "distribution": "normal" }, "convergence": { "epsilon": 0.05 } }"#;
    let config = Config::from_json_str(json).unwrap();
    assert_eq!(config.general.distribution, Distribution::Normal);
    assert_eq!(config.general.processors, 4);
    assert!((config.convergence.epsilon - 0.05).abs() < f64::EPSILON);
    assert_eq!(config.convergence.cycle_cap, 1_000_000);
}

#[test]
fn test_full_json() {
    let json = r#"{
        "general": { "processors": 16, "distribution": "Normal", "seed": 7 },
        "sweep": { "max_modules": 128 },
        "convergence": { "epsilon": 0.01, "cycle_cap": 5000 },
        "normal": { "std_dev": 2.5 }
    }"#;
    let config = Config::from_json_str(json).unwrap();
    assert_eq!(config.general.processors, 16);
    assert_eq!(config.general.seed, 7);
    assert_eq!(config.sweep.max_modules, 128);
    assert_eq!(config.convergence.cycle_cap, 5000);
    assert!((config.normal.std_dev - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_config_serializes_back_to_json() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    let again = Config::from_json_str(&json).unwrap();
    assert_eq!(again.general.distribution, config.general.distribution);
    assert_eq!(again.sweep.max_modules, config.sweep.max_modules);
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = Config::from_json_str("{ \"general\": ").unwrap_err();
    assert!(matches!(err, SimError::ConfigParse(_)));
}

#[test]
fn test_unknown_distribution_in_json_is_a_parse_error() {
    let err = Config::from_json_str(r#"{ "general": { "distribution": "poisson" } }"#).unwrap_err();
    assert!(matches!(err, SimError::ConfigParse(_)));
}

#[rstest]
#[case(r#"{ "general": { "processors": 0 } }"#)]
#[case(r#"{ "sweep": { "max_modules": 0 } }"#)]
#[case(r#"{ "convergence": { "epsilon": 0.0 } }"#)]
#[case(r#"{ "convergence": { "epsilon": -0.1 } }"#)]
#[case(r#"{ "convergence": { "cycle_cap": 0 } }"#)]
#[case(r#"{ "normal": { "std_dev": -1.0 } }"#)]
fn test_validation_rejects(#[case] json: &str) {
    assert!(Config::from_json_str(json).is_err());
}

#[test]
fn test_validation_error_kinds() {
    let mut config = Config::default();
    config.general.processors = 0;
    assert!(matches!(config.validate(), Err(SimError::InvalidProcessorCount(0))));

    let mut config = Config::default();
    config.sweep.max_modules = 0;
    assert!(matches!(config.validate(), Err(SimError::InvalidModuleBound(0))));

    let mut config = Config::default();
    config.convergence.epsilon = f64::NAN;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

    let mut config = Config::default();
    config.normal.std_dev = f64::INFINITY;
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
}

#[rstest]
#[case("uniform", Distribution::Uniform)]
#[case("Uniform", Distribution::Uniform)]
#[case("u", Distribution::Uniform)]
#[case("normal", Distribution::Normal)]
#[case("NORMAL", Distribution::Normal)]
#[case("n", Distribution::Normal)]
fn test_distribution_from_str(#[case] input: &str, #[case] expected: Distribution) {
    assert_eq!(input.parse::<Distribution>().unwrap(), expected);
}

#[test]
fn test_distribution_from_str_is_strict() {
    let err = "gaussian".parse::<Distribution>().unwrap_err();
    assert!(matches!(err, SimError::InvalidDistribution(ref s) if s == "gaussian"));
}

#[rstest]
#[case('u', Distribution::Uniform)]
#[case('n', Distribution::Normal)]
#[case('x', Distribution::Normal)]
#[case('U', Distribution::Normal)]
fn test_distribution_selector_is_permissive(#[case] selector: char, #[case] expected: Distribution) {
    assert_eq!(Distribution::from_selector(selector), expected);
}

#[test]
fn test_distribution_selector_fallback_is_logged() {
    let (distribution, logs) = capture_warnings(|| Distribution::from_selector('x'));
    assert_eq!(distribution, Distribution::Normal);
    assert!(logs.contains("unrecognized distribution selector"), "{logs}");
    assert!(logs.contains("selector=x"), "{logs}");

    let (distribution, logs) = capture_warnings(|| Distribution::from_selector('n'));
    assert_eq!(distribution, Distribution::Normal);
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn test_distribution_display() {
    assert_eq!(Distribution::Uniform.to_string(), "uniform");
    assert_eq!(Distribution::Normal.to_string(), "normal");
}

#[test]
fn test_parse_json_str_defers_validation() {
    let mut config = Config::parse_json_str(r#"{"general":{"processors":0}}"#).unwrap();
    assert_eq!(config.general.processors, 0);
    assert!(matches!(config.validate(), Err(SimError::InvalidProcessorCount(0))));

    config.general.processors = 4;
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_json_str_still_rejects_malformed_json() {
    let err = Config::parse_json_str("{ not json").unwrap_err();
    assert!(matches!(err, SimError::ConfigParse(_)));
}
