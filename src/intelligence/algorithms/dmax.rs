// ABOUTME: Standard and Bishop Modified D-max lactate threshold detection
// ABOUTME: Fits a cubic, draws a baseline chord, and locates the point of maximum perpendicular distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # D-max Family
//!
//! Both variants share one geometric path and differ only in where the
//! baseline chord starts:
//!
//! - **Standard D-max**: chord from the first stage to the last stage.
//! - **Modified D-max** (Bishop et al., 1998): chord from the stage preceding
//!   the first rise of at least 0.4 mmol/L above a trimmed-mean baseline to the
//!   last stage. On flat elite curves the standard chord is so shallow that the
//!   farthest point lands on LT1; the re-anchored chord is steeper and finds LT2.
//!
//! Fits with R² below the configured gate skip the geometric search and
//! interpolate at 4.0 mmol/L instead.
//!
//! # References
//!
//! - Cheng, B. et al. (1992). "A new approach for the determination of ventilatory
//!   and lactate thresholds." *Int J Sports Med*, 13(7), 518-522.
//! - Bishop, D., Jenkins, D.G., & Mackinnon, L.T. (1998). "The relationship between
//!   plasma lactate parameters, Wpeak and 1-h cycling performance in women."
//!   *Med Sci Sports Exerc*, 30(8), 1270-1275.

use super::confidence::ConfidenceScorer;
use super::geometric::{BaselineLine, DmaxFinder};
use super::interpolation::StageInterpolator;
use super::polynomial::{CubicFitter, PolynomialCoefficients};
use super::profile::AthleteProfileClassifier;
use super::FLOAT_TOLERANCE;
use crate::intelligence::engine::LactateThresholdEngine;
use crate::intelligence::observer::AnalysisEvent;
use crate::intelligence::threshold::{Confidence, ThresholdMethod, ThresholdResult};
use lactate_core::{EngineError, EngineResult, StepTest};
use serde::{Deserialize, Serialize};

/// Where the Modified D-max chord starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifiedDmaxAnchor {
    /// Trimmed-mean baseline lactate (mmol/L)
    pub baseline_level: f64,
    /// First stage at least the rise threshold above baseline, if any
    pub rise_index: Option<usize>,
    /// Stage the chord starts from
    pub start_index: usize,
}

/// Monotonicity check of a lactate series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonotonicityReport {
    /// Number of consecutive-stage decreases
    pub violations: usize,
    /// Largest single decrease (mmol/L)
    pub largest_dip: f64,
    /// Whether the decreases stay within tolerance
    pub reliable: bool,
}

impl LactateThresholdEngine {
    /// Standard D-max threshold
    ///
    /// # Errors
    ///
    /// - `InsufficientData` with fewer stages than the D-max minimum
    /// - `InvalidInput` when the first and last stage share the same intensity
    pub fn dmax(&self, test: &StepTest) -> EngineResult<ThresholdResult> {
        let method = ThresholdMethod::Dmax;
        self.emit(&AnalysisEvent::MethodAttempted {
            method,
            stages: test.len(),
        });
        self.require_dmax_stages(test, "D-max")?;

        let intensity = test.intensities();
        let lactate = test.lactates();
        let monotonicity = self.check_monotonicity(&lactate);

        let fit = CubicFitter::fit(&intensity, &lactate)?;
        if fit.r_squared < self.config().curve_fit.min_r_squared {
            return self.poor_fit_fallback(test, method, fit);
        }

        let last = lactate.len() - 1;
        let start = (intensity[0], lactate[0]);
        let end = (intensity[last], lactate[last]);
        self.geometric_result(test, method, fit, start, end, &monotonicity)
    }

    /// Bishop Modified D-max threshold
    ///
    /// # Errors
    ///
    /// - `InsufficientData` with fewer stages than the D-max minimum
    /// - `InvalidInput` when the chord endpoints share the same intensity
    pub fn modified_dmax(&self, test: &StepTest) -> EngineResult<ThresholdResult> {
        let method = ThresholdMethod::ModifiedDmax;
        self.emit(&AnalysisEvent::MethodAttempted {
            method,
            stages: test.len(),
        });
        self.require_dmax_stages(test, "Modified D-max")?;

        let intensity = test.intensities();
        let lactate = test.lactates();
        let anchor = self.modified_dmax_anchor(&lactate)?;
        let monotonicity = self.check_monotonicity(&lactate);

        let fit = CubicFitter::fit(&intensity, &lactate)?;
        if fit.r_squared < self.config().curve_fit.min_r_squared {
            return self.poor_fit_fallback(test, method, fit);
        }

        let last = lactate.len() - 1;
        let start = (intensity[anchor.start_index], lactate[anchor.start_index]);
        let end = (intensity[last], lactate[last]);
        let result = self.geometric_result(test, method, fit, start, end, &monotonicity)?;

        Ok(if anchor.rise_index.is_none() {
            result.with_warning(format!(
                "Unusual lactate curve: no rise of {} mmol/L above baseline {:.2} mmol/L, chord anchored at midpoint stage {}",
                self.config().profile.rise_threshold_mmol,
                anchor.baseline_level,
                anchor.start_index
            ))
        } else {
            result
        })
    }

    /// Locate the Modified D-max chord start
    ///
    /// The rise index is the first stage whose lactate reaches the baseline level
    /// plus the rise threshold; the chord starts one stage earlier (or at stage 0
    /// when the rise is immediate). Without any rise the midpoint stage stands in
    /// as a degraded rise index.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty series
    pub fn modified_dmax_anchor(&self, lactate: &[f64]) -> EngineResult<ModifiedDmaxAnchor> {
        let profile = &self.config().profile;
        let baseline = AthleteProfileClassifier::baseline(lactate, profile)?;
        let rise_target = baseline.level + profile.rise_threshold_mmol - FLOAT_TOLERANCE;

        let rise_index = lactate.iter().position(|l| *l >= rise_target);
        let effective_rise = rise_index.unwrap_or(lactate.len() / 2);
        let start_index = effective_rise.saturating_sub(1);

        if rise_index.is_none() {
            self.emit(&AnalysisEvent::NoRiseDetected {
                baseline_level: baseline.level,
                anchor_index: start_index,
            });
        }

        Ok(ModifiedDmaxAnchor {
            baseline_level: baseline.level,
            rise_index,
            start_index,
        })
    }

    /// Count retrograde steps in a lactate series
    ///
    /// A single dip smaller than the tolerance is normal measurement noise;
    /// anything beyond that is reported and flagged on geometric results.
    #[must_use]
    pub fn check_monotonicity(&self, lactate: &[f64]) -> MonotonicityReport {
        let quality = &self.config().data_quality;
        let (violations, largest_dip) =
            lactate
                .windows(2)
                .fold((0_usize, 0.0_f64), |(count, largest), pair| {
                    let drop = pair[0] - pair[1];
                    if drop > 0.0 {
                        (count + 1, largest.max(drop))
                    } else {
                        (count, largest)
                    }
                });

        let reliable =
            violations <= quality.max_monotonic_violations && largest_dip < quality.dip_tolerance_mmol;
        if !reliable {
            self.emit(&AnalysisEvent::NonMonotonicCurve {
                violations,
                largest_dip,
            });
        }

        MonotonicityReport {
            violations,
            largest_dip,
            reliable,
        }
    }

    /// Interpolate at the first upward crossing of the anaerobic target, or use
    /// the nearest stage when lactate never crosses it
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for a test without stages
    pub fn fallback_threshold(&self, test: &StepTest) -> EngineResult<ThresholdResult> {
        let target = self.config().fallback.anaerobic_target_mmol;
        let lactate = test.lactates();

        let Some(&first) = StageInterpolator::upward_crossings(&lactate, target).first() else {
            return self.estimate_threshold(test, target);
        };
        self.emit(&AnalysisEvent::CrossingSelected {
            target,
            stage_index: first,
            second_crossing: false,
        });
        self.crossing_result(test, first, target)
    }

    /// Stage whose lactate is nearest `target`, without interpolation
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for a test without stages
    pub fn estimate_threshold(&self, test: &StepTest, target: f64) -> EngineResult<ThresholdResult> {
        let lactate = test.lactates();
        let index = StageInterpolator::nearest_stage(&lactate, target)
            .ok_or_else(|| EngineError::insufficient_data("Threshold estimate", 1, 0))?;
        let stage = &test.stages()[index];

        Ok(ThresholdResult::new(
            stage.intensity.value(),
            stage.lactate,
            f64::from(stage.heart_rate),
            test.unit(),
            ThresholdMethod::Fallback,
            Confidence::Low,
        )
        .with_warning(format!(
            "Lactate never crosses {target} mmol/L, using nearest stage {index}"
        )))
    }

    /// Interpolated `FALLBACK` result between stage `index` and `index + 1`
    pub(crate) fn crossing_result(
        &self,
        test: &StepTest,
        index: usize,
        target: f64,
    ) -> EngineResult<ThresholdResult> {
        let point = StageInterpolator::interpolate_at_crossing(test, index, target).ok_or_else(
            || EngineError::invalid_input(format!("no stage pair at crossing index {index}")),
        )?;
        Ok(ThresholdResult::new(
            point.intensity,
            point.lactate,
            point.heart_rate,
            test.unit(),
            ThresholdMethod::Fallback,
            Confidence::Low,
        )
        .with_warning(format!("Interpolated at fixed {target} mmol/L")))
    }

    fn require_dmax_stages(&self, test: &StepTest, method: &str) -> EngineResult<()> {
        let required = self.config().curve_fit.min_dmax_stages;
        if test.len() < required {
            return Err(EngineError::insufficient_data(method, required, test.len()));
        }
        Ok(())
    }

    fn poor_fit_fallback(
        &self,
        test: &StepTest,
        method: ThresholdMethod,
        fit: PolynomialCoefficients,
    ) -> EngineResult<ThresholdResult> {
        let min_r_squared = self.config().curve_fit.min_r_squared;
        self.emit(&AnalysisEvent::PoorFit {
            method,
            r_squared: fit.r_squared,
            min_r_squared,
        });

        let mut result = self.fallback_threshold(test)?.with_warning(format!(
            "Poor curve fit for {} (R² = {:.3} < {min_r_squared})",
            method.name(),
            fit.r_squared
        ));
        result.r_squared = Some(fit.r_squared);
        result.coefficients = Some(fit);
        Ok(result)
    }

    fn geometric_result(
        &self,
        test: &StepTest,
        method: ThresholdMethod,
        fit: PolynomialCoefficients,
        start: (f64, f64),
        end: (f64, f64),
        monotonicity: &MonotonicityReport,
    ) -> EngineResult<ThresholdResult> {
        let baseline = BaselineLine::through(start, end)?;
        let (x_min, x_max) = (start.0.min(end.0), start.0.max(end.0));
        let point = DmaxFinder::max_perpendicular_distance(
            &fit,
            &baseline,
            x_min,
            x_max,
            self.config().curve_fit.sample_count,
        );

        let confidence =
            ConfidenceScorer::score(fit.r_squared, point.distance, &test.lactates(), self.config());
        let heart_rate = StageInterpolator::interpolate_heart_rate(test, point.intensity);

        let mut result = ThresholdResult::new(
            point.intensity,
            point.lactate,
            heart_rate,
            test.unit(),
            method,
            confidence,
        );
        result.r_squared = Some(fit.r_squared);
        result.coefficients = Some(fit);
        result.dmax_distance = Some(point.distance);

        if !monotonicity.reliable {
            result = result.with_warning(format!(
                "Lactate curve is not monotonic ({} decreases, largest {:.2} mmol/L), threshold may be unreliable",
                monotonicity.violations, monotonicity.largest_dip
            ));
        }
        Ok(result)
    }
}
