// ABOUTME: Confidence grading of geometric threshold estimates
// ABOUTME: Combines cubic fit quality with the D-max distance relative to the lactate range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::LactateThresholdConfig;
use crate::intelligence::threshold::Confidence;

/// Grades D-max style estimates
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Grade an estimate from its fit and perpendicular distance
    ///
    /// - `r_squared` below the fit gate is `Low`
    /// - distance relative to `max − min` lactate below the low cutoff is `Low`
    ///   (the curve is too linear for the point to stand out from noise)
    /// - a high-confidence fit with a pronounced distance is `High`
    /// - anything else is `Medium`
    #[must_use]
    pub fn score(
        r_squared: f64,
        distance: f64,
        lactate: &[f64],
        config: &LactateThresholdConfig,
    ) -> Confidence {
        if r_squared < config.curve_fit.min_r_squared {
            return Confidence::Low;
        }

        let relative = Self::relative_distance(distance, lactate);
        if relative < config.confidence.low_relative_distance {
            Confidence::Low
        } else if r_squared >= config.curve_fit.high_confidence_r_squared
            && relative >= config.confidence.high_relative_distance
        {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }

    /// `distance / (max − min)`; zero when the lactate values do not vary
    #[must_use]
    pub fn relative_distance(distance: f64, lactate: &[f64]) -> f64 {
        let max = lactate.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = lactate.iter().copied().fold(f64::INFINITY, f64::min);
        let range = max - min;
        if !range.is_finite() || range <= f64::EPSILON {
            return 0.0;
        }
        distance / range
    }
}
