// ABOUTME: Property-based tests for threshold detection invariants
// ABOUTME: Determinism, minimum-stage errors, anchor ordering, and unit preservation over random curves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{quiet_engine, speed_test};
use lactate_threshold::intelligence::{CubicFitter, ThresholdMethod};
use lactate_threshold::{ErrorCode, IntensityUnit, StepTest};
use proptest::prelude::*;

/// Lactate series of `len` stages built from non-negative increments
fn rising_lactate(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    (0.5_f64..2.0, prop::collection::vec(0.0_f64..2.5, len)).prop_map(|(start, steps)| {
        steps
            .iter()
            .scan(start, |level, step| {
                let value = *level;
                *level += step;
                Some(value)
            })
            .collect()
    })
}

/// Arbitrary lactate series, not necessarily rising
fn any_lactate(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.3_f64..12.0, len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_analysis_is_deterministic(lactate in any_lactate(1..10)) {
        let engine = quiet_engine();
        let test = speed_test(&lactate);
        prop_assert_eq!(engine.analyze(&test).unwrap(), engine.analyze(&test).unwrap());
    }

    #[test]
    fn prop_dmax_needs_four_stages(lactate in any_lactate(1..4)) {
        let engine = quiet_engine();
        let test = speed_test(&lactate);
        prop_assert_eq!(engine.dmax(&test).unwrap_err().code, ErrorCode::InsufficientData);
        prop_assert_eq!(
            engine.modified_dmax(&test).unwrap_err().code,
            ErrorCode::InsufficientData
        );
    }

    #[test]
    fn prop_anchor_start_within_one_of_rise(lactate in any_lactate(2..14)) {
        let anchor = quiet_engine().modified_dmax_anchor(&lactate).unwrap();
        prop_assert!(anchor.start_index < lactate.len());
        match anchor.rise_index {
            Some(rise) => {
                prop_assert!(anchor.start_index <= rise);
                prop_assert!(rise - anchor.start_index <= 1);
            }
            None => prop_assert_eq!(anchor.start_index, (lactate.len() / 2).saturating_sub(1)),
        }
    }

    #[test]
    fn prop_dmax_point_inside_test_range(lactate in rising_lactate(4..12)) {
        let test = speed_test(&lactate);
        let result = quiet_engine().dmax(&test).unwrap();
        if result.method == ThresholdMethod::Dmax {
            let intensity = test.intensities();
            prop_assert!(result.intensity >= intensity[0] - 1e-9);
            prop_assert!(result.intensity <= intensity[intensity.len() - 1] + 1e-9);
            prop_assert!(result.dmax_distance.unwrap() >= 0.0);
        }
    }

    #[test]
    fn prop_r_squared_is_bounded(lactate in any_lactate(4..12)) {
        let intensity: Vec<f64> = (0..lactate.len()).map(|i| 100.0 + 25.0 * i as f64).collect();
        let fit = CubicFitter::fit(&intensity, &lactate).unwrap();
        prop_assert!((0.0..=1.0).contains(&fit.r_squared));
        prop_assert_eq!(fit.predictions.len(), lactate.len());
    }

    #[test]
    fn prop_results_keep_power_unit(lactate in rising_lactate(1..10)) {
        let intensity: Vec<f64> = (0..lactate.len()).map(|i| 150.0 + 30.0 * i as f64).collect();
        let heart_rate: Vec<u32> = (0..lactate.len()).map(|i| 110 + 8 * i as u32).collect();
        let test =
            StepTest::from_columns(&intensity, IntensityUnit::Watt, &lactate, &heart_rate).unwrap();

        let report = quiet_engine().analyze(&test).unwrap();
        prop_assert_eq!(report.unit, IntensityUnit::Watt);
        for result in [&report.aerobic, &report.anaerobic, &report.ensemble_lt2]
            .into_iter()
            .flatten()
        {
            prop_assert_eq!(result.unit, IntensityUnit::Watt);
        }
    }

    #[test]
    fn prop_anaerobic_always_resolved(lactate in any_lactate(1..10)) {
        // Nearest-stage estimation guarantees an answer for any non-empty test
        let result = quiet_engine().resolve_anaerobic(&speed_test(&lactate)).unwrap();
        prop_assert!(result.is_some());
    }
}
