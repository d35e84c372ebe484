// ABOUTME: Integration tests for threshold configuration loading and validation
// ABOUTME: Covers defaults, LACTATE_* environment overrides, JSON documents, and engine construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, scenario_a, speed_test};
use lactate_threshold::config::{ConfigError, LactateThresholdConfig};
use lactate_threshold::intelligence::{LactateThresholdEngine, ThresholdMethod};
use lactate_threshold::ErrorCode;
use serial_test::serial;
use std::env;

const OVERRIDES: &[&str] = &[
    "LACTATE_MIN_R_SQUARED",
    "LACTATE_RISE_THRESHOLD_MMOL",
    "LACTATE_SECOND_CROSSING_MIN_GAP",
    "LACTATE_ANAEROBIC_TARGET_MMOL",
    "LACTATE_SAMPLE_COUNT",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
fn test_defaults_match_published_cutoffs() {
    let config = LactateThresholdConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.curve_fit.min_dmax_stages, 4);
    assert!((config.curve_fit.min_r_squared - 0.90).abs() < f64::EPSILON);
    assert!((config.curve_fit.high_confidence_r_squared - 0.95).abs() < f64::EPSILON);
    assert!((config.profile.rise_threshold_mmol - 0.4).abs() < f64::EPSILON);
    assert!((config.fallback.aerobic_target_mmol - 2.0).abs() < f64::EPSILON);
    assert!((config.fallback.anaerobic_target_mmol - 4.0).abs() < f64::EPSILON);
    assert_eq!(config.fallback.second_crossing_min_gap, 1);
}

#[test]
#[serial]
fn test_load_without_overrides_is_default() {
    clear_overrides();
    assert_eq!(
        LactateThresholdConfig::load().unwrap(),
        LactateThresholdConfig::default()
    );
}

#[test]
#[serial]
fn test_environment_overrides_apply() {
    clear_overrides();
    env::set_var("LACTATE_MIN_R_SQUARED", "0.8");
    env::set_var("LACTATE_SECOND_CROSSING_MIN_GAP", "3");
    env::set_var("LACTATE_SAMPLE_COUNT", "250");

    let config = LactateThresholdConfig::load();
    clear_overrides();

    let config = config.unwrap();
    assert!((config.curve_fit.min_r_squared - 0.8).abs() < f64::EPSILON);
    assert_eq!(config.fallback.second_crossing_min_gap, 3);
    assert_eq!(config.curve_fit.sample_count, 250);
}

#[test]
#[serial]
fn test_unparsable_override_is_rejected() {
    clear_overrides();
    env::set_var("LACTATE_RISE_THRESHOLD_MMOL", "a lot");

    let result = LactateThresholdConfig::load();
    clear_overrides();

    match result {
        Err(ConfigError::Parse(message)) => {
            assert!(message.contains("LACTATE_RISE_THRESHOLD_MMOL"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_inconsistent_override_fails_validation() {
    clear_overrides();
    // Aerobic target 2.0 must stay below the anaerobic target
    env::set_var("LACTATE_ANAEROBIC_TARGET_MMOL", "1.5");

    let result = LactateThresholdConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = LactateThresholdConfig::from_json(
        r#"{"curve_fit": {"min_r_squared": 0.85}, "fallback": {"second_crossing_min_gap": 2}}"#,
    )
    .unwrap();

    assert!((config.curve_fit.min_r_squared - 0.85).abs() < f64::EPSILON);
    assert_eq!(config.fallback.second_crossing_min_gap, 2);
    assert_eq!(config.profile, LactateThresholdConfig::default().profile);
}

#[test]
fn test_json_validation_errors() {
    assert!(matches!(
        LactateThresholdConfig::from_json(r#"{"curve_fit": {"min_dmax_stages": 3}}"#),
        Err(ConfigError::ValueOutOfRange(_))
    ));
    assert!(matches!(
        LactateThresholdConfig::from_json(
            r#"{"fallback": {"aerobic_band_min_mmol": 3.0, "aerobic_band_max_mmol": 2.0}}"#
        ),
        Err(ConfigError::InvalidRange(_))
    ));
    assert!(matches!(
        LactateThresholdConfig::from_json("[1, 2"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_engine_rejects_invalid_config() {
    let mut config = LactateThresholdConfig::default();
    config.curve_fit.min_r_squared = 1.5;

    let err = LactateThresholdEngine::new(config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_stricter_fit_gate_changes_outcome() {
    init_test_logging();
    let test = speed_test(&[1.0, 1.1, 1.6, 1.4, 2.6, 3.5]);

    let lenient = LactateThresholdEngine::default().dmax(&test).unwrap();
    assert_eq!(lenient.method, ThresholdMethod::Dmax);

    let mut config = LactateThresholdConfig::default();
    config.curve_fit.min_r_squared = 0.999;
    config.curve_fit.high_confidence_r_squared = 0.999;
    let strict = LactateThresholdEngine::new(config).unwrap().dmax(&test).unwrap();
    assert_eq!(strict.method, ThresholdMethod::Fallback);
}

#[test]
fn test_custom_sample_count_still_finds_knee() {
    let mut config = LactateThresholdConfig::default();
    config.curve_fit.sample_count = 50;
    let result = LactateThresholdEngine::new(config)
        .unwrap()
        .dmax(&scenario_a())
        .unwrap();
    assert!(result.intensity > 13.0 && result.intensity < 14.0);
}
