// ABOUTME: Aerobic (LT1) and anaerobic (LT2) threshold resolvers
// ABOUTME: Chain profile-aware detectors with fixed 2.0 and 4.0 mmol/L interpolation fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::interpolation::StageInterpolator;
use super::profile::AthleteProfile;
use crate::intelligence::engine::LactateThresholdEngine;
use crate::intelligence::observer::AnalysisEvent;
use crate::intelligence::threshold::{Confidence, ThresholdMethod, ThresholdResult};
use lactate_core::{EngineResult, StepTest};

impl LactateThresholdEngine {
    /// Classify the test, then resolve its aerobic threshold
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the test cannot be classified
    pub fn resolve_aerobic(&self, test: &StepTest) -> EngineResult<Option<ThresholdResult>> {
        let profile = self.classify(test)?;
        Ok(self.resolve_aerobic_with_profile(test, &profile))
    }

    /// Classify the test, then resolve its anaerobic threshold
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the test cannot be classified
    pub fn resolve_anaerobic(&self, test: &StepTest) -> EngineResult<Option<ThresholdResult>> {
        let profile = self.classify(test)?;
        Ok(self.resolve_anaerobic_with_profile(test, &profile))
    }

    /// Aerobic threshold for an already classified test
    ///
    /// 1. Elite-flat with enough points: the injected LT1 detector, if any
    /// 2. Standard D-max when its lactate falls inside the aerobic band
    /// 3. Linear interpolation at 2.0 mmol/L
    /// 4. Elite-flat only: stage nearest baseline + 0.3 mmol/L
    /// 5. Stage nearest 2.0 mmol/L
    #[must_use]
    pub fn resolve_aerobic_with_profile(
        &self,
        test: &StepTest,
        profile: &AthleteProfile,
    ) -> Option<ThresholdResult> {
        let fallback = &self.config().fallback;
        let tag = |result: ThresholdResult| result.with_profile(profile.profile_type);

        if profile.is_elite_flat() && test.len() >= fallback.min_lt1_ensemble_points {
            if let Some(detector) = self.lt1_detector() {
                self.emit(&AnalysisEvent::MethodAttempted {
                    method: ThresholdMethod::EnsembleLt1,
                    stages: test.len(),
                });
                match detector.detect_lt1(test, profile) {
                    Some(result) => return Some(tag(self.accept(result))),
                    None => self.reject(ThresholdMethod::EnsembleLt1, "detector found no LT1"),
                }
            }
        }

        match self.dmax(test) {
            Ok(result)
                if result.method == ThresholdMethod::Dmax
                    && (fallback.aerobic_band_min_mmol..=fallback.aerobic_band_max_mmol)
                        .contains(&result.lactate) =>
            {
                return Some(tag(self.accept(result)));
            }
            Ok(result) if result.method == ThresholdMethod::Dmax => {
                let reason = format!(
                    "lactate {:.2} mmol/L outside aerobic band",
                    result.lactate
                );
                self.reject(ThresholdMethod::Dmax, &reason);
            }
            Ok(_) => self.reject(ThresholdMethod::Dmax, "poor curve fit"),
            Err(error) => self.reject(ThresholdMethod::Dmax, &error.to_string()),
        }

        let target = fallback.aerobic_target_mmol;
        self.emit(&AnalysisEvent::MethodAttempted {
            method: ThresholdMethod::FixedLinear,
            stages: test.len(),
        });
        if let Some(point) = StageInterpolator::interpolate_at_lactate(test, target) {
            let result = ThresholdResult::new(
                point.intensity,
                point.lactate,
                point.heart_rate,
                test.unit(),
                ThresholdMethod::FixedLinear,
                Confidence::Medium,
            );
            return Some(tag(self.accept(result)));
        }
        self.reject(ThresholdMethod::FixedLinear, "lactate never crosses target");

        if profile.is_elite_flat() {
            let elite_target = profile.baseline_avg + fallback.baseline_plus_lt1_mmol;
            if let Some(result) = self.nearest_stage_result(
                test,
                elite_target,
                ThresholdMethod::BaselinePlusLt1,
                Confidence::Medium,
            ) {
                return Some(tag(self.accept(result)));
            }
        }

        if let Some(result) =
            self.nearest_stage_result(test, target, ThresholdMethod::Fallback, Confidence::Low)
        {
            let result = result.with_warning(format!(
                "Lactate never crosses {target} mmol/L, using nearest stage"
            ));
            return Some(tag(self.accept(result)));
        }

        self.emit(&AnalysisEvent::ThresholdUndetermined {
            threshold: "aerobic",
        });
        None
    }

    /// Anaerobic threshold for an already classified test
    ///
    /// 1. Elite-flat with enough stages: Modified D-max
    /// 2. Standard D-max
    /// 3. Fixed 4.0 mmol/L crossing, preferring a later re-crossing
    /// 4. Stage nearest 4.0 mmol/L
    ///
    /// A D-max attempt counts as failed when it errors or its fit was too
    /// poor for the geometric search.
    #[must_use]
    pub fn resolve_anaerobic_with_profile(
        &self,
        test: &StepTest,
        profile: &AthleteProfile,
    ) -> Option<ThresholdResult> {
        let tag = |result: ThresholdResult| result.with_profile(profile.profile_type);

        if profile.is_elite_flat() && test.len() >= self.config().curve_fit.min_dmax_stages {
            match self.modified_dmax(test) {
                Ok(result) if result.method == ThresholdMethod::ModifiedDmax => {
                    return Some(tag(self.accept(result)));
                }
                Ok(_) => self.reject(ThresholdMethod::ModifiedDmax, "poor curve fit"),
                Err(error) => self.reject(ThresholdMethod::ModifiedDmax, &error.to_string()),
            }
        }

        match self.dmax(test) {
            Ok(result) if result.method == ThresholdMethod::Dmax => {
                return Some(tag(self.accept(result)));
            }
            Ok(_) => self.reject(ThresholdMethod::Dmax, "poor curve fit"),
            Err(error) => self.reject(ThresholdMethod::Dmax, &error.to_string()),
        }

        self.emit(&AnalysisEvent::MethodAttempted {
            method: ThresholdMethod::Fallback,
            stages: test.len(),
        });
        let result = match self.anaerobic_crossing(test) {
            Some(index) => self
                .crossing_result(test, index, self.config().fallback.anaerobic_target_mmol)
                .ok(),
            None => self
                .estimate_threshold(test, self.config().fallback.anaerobic_target_mmol)
                .ok(),
        };

        if let Some(result) = result {
            return Some(tag(self.accept(result)));
        }
        self.emit(&AnalysisEvent::ThresholdUndetermined {
            threshold: "anaerobic",
        });
        None
    }

    /// Crossing of the anaerobic target to interpolate at
    ///
    /// A crossing that starts more than the configured gap after the first one
    /// is preferred; the first crossing near the start of a test is treated as
    /// spurious when the curve later dips back and re-crosses.
    #[must_use]
    pub fn anaerobic_crossing(&self, test: &StepTest) -> Option<usize> {
        let fallback = &self.config().fallback;
        let target = fallback.anaerobic_target_mmol;
        let crossings = StageInterpolator::upward_crossings(&test.lactates(), target);

        let first = *crossings.first()?;
        let second = crossings
            .iter()
            .copied()
            .find(|&i| i > first + fallback.second_crossing_min_gap);

        let stage_index = second.unwrap_or(first);
        self.emit(&AnalysisEvent::CrossingSelected {
            target,
            stage_index,
            second_crossing: second.is_some(),
        });
        Some(stage_index)
    }

    fn nearest_stage_result(
        &self,
        test: &StepTest,
        target: f64,
        method: ThresholdMethod,
        confidence: Confidence,
    ) -> Option<ThresholdResult> {
        self.emit(&AnalysisEvent::MethodAttempted {
            method,
            stages: test.len(),
        });
        let index = StageInterpolator::nearest_stage(&test.lactates(), target)?;
        let stage = test.stages().get(index)?;
        Some(ThresholdResult::new(
            stage.intensity.value(),
            stage.lactate,
            f64::from(stage.heart_rate),
            test.unit(),
            method,
            confidence,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::intelligence::LactateThresholdConfig;
    use crate::intelligence::algorithms::profile::ProfileType;
    use crate::intelligence::observer::NoopObserver;
    use lactate_core::IntensityUnit;
    use std::sync::Arc;

    fn engine() -> LactateThresholdEngine {
        LactateThresholdEngine::default().with_observer(Arc::new(NoopObserver))
    }

    fn speed_test(lactate: &[f64]) -> StepTest {
        let intensity: Vec<f64> = (0..lactate.len()).map(|i| 8.0 + 2.0 * i as f64).collect();
        let heart_rate: Vec<u32> = (0..lactate.len()).map(|i| 120 + 10 * i as u32).collect();
        StepTest::from_columns(&intensity, IntensityUnit::KmPerHour, lactate, &heart_rate)
            .unwrap()
    }

    #[test]
    fn test_second_crossing_preferred() {
        // crossings at 0 and 3, gap is larger than one stage
        let test = speed_test(&[3.5, 4.2, 3.6, 3.8, 5.0]);
        assert_eq!(engine().anaerobic_crossing(&test), Some(3));
    }

    #[test]
    fn test_crossing_gap_is_configurable() {
        // crossings at 0 and 2
        let test = speed_test(&[3.5, 4.2, 3.9, 4.5]);
        assert_eq!(engine().anaerobic_crossing(&test), Some(2));

        let mut config = LactateThresholdConfig::default();
        config.fallback.second_crossing_min_gap = 2;
        let strict = LactateThresholdEngine::new(config)
            .unwrap()
            .with_observer(Arc::new(NoopObserver));
        assert_eq!(strict.anaerobic_crossing(&test), Some(0));
    }

    #[test]
    fn test_no_crossing() {
        assert_eq!(
            engine().anaerobic_crossing(&speed_test(&[1.0, 2.0, 3.0])),
            None
        );
    }

    #[test]
    fn test_aerobic_three_stages_interpolates_at_two() {
        let result = engine()
            .resolve_aerobic(&speed_test(&[1.2, 1.6, 2.4]))
            .unwrap()
            .unwrap();
        assert_eq!(result.method, ThresholdMethod::FixedLinear);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!((result.intensity - 11.0).abs() < 1e-12);
        assert_eq!(result.profile_type, Some(ProfileType::Standard));
    }

    #[test]
    fn test_anaerobic_three_stages_estimates_nearest() {
        let result = engine()
            .resolve_anaerobic(&speed_test(&[1.5, 2.0, 2.8]))
            .unwrap()
            .unwrap();
        assert_eq!(result.method, ThresholdMethod::Fallback);
        assert_eq!(result.confidence, Confidence::Low);
        assert!((result.lactate - 2.8).abs() < f64::EPSILON);
    }
}
