// ABOUTME: Unified LT2 detection through a three-method priority hierarchy
// ABOUTME: Modified D-max, then exponential rise onset, then minimum lactate + 1.0 mmol/L interpolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::interpolation::StageInterpolator;
use super::profile::AthleteProfile;
use crate::intelligence::engine::LactateThresholdEngine;
use crate::intelligence::observer::AnalysisEvent;
use crate::intelligence::threshold::{Confidence, ThresholdMethod, ThresholdResult};
use lactate_core::{EngineError, EngineResult, StepTest};

impl LactateThresholdEngine {
    /// LT2 from the first method that succeeds
    ///
    /// 1. Modified D-max, accepted unless graded `Low`
    /// 2. Exponential rise onset (`Medium`)
    /// 3. Minimum lactate + 1.0 mmol/L interpolation (`Low`)
    ///
    /// Returns `None` only for degenerate curves where nothing applies.
    #[must_use]
    pub fn detect_lt2(&self, test: &StepTest, profile: &AthleteProfile) -> Option<ThresholdResult> {
        match self.modified_dmax(test) {
            Ok(result) if result.confidence != Confidence::Low => {
                return Some(self.accept(result).with_profile(profile.profile_type));
            }
            Ok(_) => self.reject(ThresholdMethod::ModifiedDmax, "confidence too low"),
            Err(error) => self.reject(ThresholdMethod::ModifiedDmax, &error.to_string()),
        }

        match self.exponential_rise(test) {
            Ok(Some(result)) => {
                return Some(self.accept(result).with_profile(profile.profile_type));
            }
            Ok(None) => self.reject(ThresholdMethod::ExponentialRise, "no steep rise"),
            Err(error) => self.reject(ThresholdMethod::ExponentialRise, &error.to_string()),
        }

        if let Some(result) = self.baseline_plus_lt2(test) {
            return Some(self.accept(result).with_profile(profile.profile_type));
        }
        self.reject(ThresholdMethod::BaselinePlusLt2, "no stages bracket the target");

        self.emit(&AnalysisEvent::ThresholdUndetermined { threshold: "lt2" });
        None
    }

    /// Midpoint of the first consecutive-stage rise steeper than the delta
    ///
    /// Intensity, lactate and heart rate are averaged between the stage before
    /// the rise and the stage at it. `Ok(None)` when no rise is steep enough.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than the minimum stages (3 by default)
    pub fn exponential_rise(&self, test: &StepTest) -> EngineResult<Option<ThresholdResult>> {
        let fallback = &self.config().fallback;
        self.emit(&AnalysisEvent::MethodAttempted {
            method: ThresholdMethod::ExponentialRise,
            stages: test.len(),
        });
        if test.len() < fallback.min_exponential_rise_stages {
            return Err(EngineError::insufficient_data(
                "Exponential rise detection",
                fallback.min_exponential_rise_stages,
                test.len(),
            ));
        }

        let stages = test.stages();
        let Some(onset) = stages
            .windows(2)
            .position(|pair| pair[1].lactate - pair[0].lactate > fallback.exponential_rise_delta_mmol)
        else {
            return Ok(None);
        };

        let (before, at) = (&stages[onset], &stages[onset + 1]);
        let midpoint = |a: f64, b: f64| (a + b) / 2.0;
        Ok(Some(ThresholdResult::new(
            midpoint(before.intensity.value(), at.intensity.value()),
            midpoint(before.lactate, at.lactate),
            midpoint(f64::from(before.heart_rate), f64::from(at.heart_rate)),
            test.unit(),
            ThresholdMethod::ExponentialRise,
            Confidence::Medium,
        )))
    }

    /// Interpolate at `max(min lactate + 1.0, 2.0)` mmol/L
    ///
    /// `None` when no pair of stages brackets the target.
    #[must_use]
    pub fn baseline_plus_lt2(&self, test: &StepTest) -> Option<ThresholdResult> {
        let fallback = &self.config().fallback;
        self.emit(&AnalysisEvent::MethodAttempted {
            method: ThresholdMethod::BaselinePlusLt2,
            stages: test.len(),
        });

        let lactate = test.lactates();
        let min_lactate = lactate.iter().copied().fold(f64::INFINITY, f64::min);
        let target =
            (min_lactate + fallback.baseline_plus_lt2_mmol).max(fallback.lt2_min_target_mmol);

        let point = StageInterpolator::interpolate_at_lactate(test, target)?;
        Some(ThresholdResult::new(
            point.intensity,
            point.lactate,
            point.heart_rate,
            test.unit(),
            ThresholdMethod::BaselinePlusLt2,
            Confidence::Low,
        ))
    }

    pub(crate) fn accept(&self, result: ThresholdResult) -> ThresholdResult {
        self.emit(&AnalysisEvent::MethodAccepted {
            method: result.method,
            confidence: result.confidence,
        });
        result
    }

    pub(crate) fn reject(&self, method: ThresholdMethod, reason: &str) {
        self.emit(&AnalysisEvent::MethodRejected { method, reason });
    }
}
