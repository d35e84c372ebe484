// ABOUTME: Geometric D-max search shared by the standard and Modified D-max variants
// ABOUTME: Samples a fitted cubic and returns the point farthest from a baseline chord
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::polynomial::PolynomialCoefficients;
use lactate_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Straight baseline `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineLine {
    /// Slope (mmol/L per intensity unit)
    pub slope: f64,
    /// Lactate at intensity zero
    pub intercept: f64,
}

impl BaselineLine {
    /// Chord through two `(intensity, lactate)` points
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when both points share the same intensity
    pub fn through(start: (f64, f64), end: (f64, f64)) -> EngineResult<Self> {
        let run = end.0 - start.0;
        if run.abs() <= f64::EPSILON {
            return Err(EngineError::invalid_input(format!(
                "baseline endpoints share intensity {}, no chord can be drawn",
                start.0
            )));
        }
        let slope = (end.1 - start.1) / run;
        Ok(Self {
            slope,
            intercept: slope.mul_add(-start.0, start.1),
        })
    }

    /// Lactate on the line at `x`
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    /// Perpendicular distance of `(x, y)` from the line
    #[must_use]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (y - self.value_at(x)).abs() / self.slope.mul_add(self.slope, 1.0).sqrt()
    }
}

/// Point on the fitted curve farthest from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmaxPoint {
    /// Sampled intensity
    pub intensity: f64,
    /// Fitted lactate at `intensity`
    pub lactate: f64,
    /// Perpendicular distance to the baseline
    pub distance: f64,
}

/// Fixed-resolution scan for the maximum perpendicular distance
pub struct DmaxFinder;

impl DmaxFinder {
    /// Sample `[x_min, x_max]` at a resolution of `(x_max − x_min) / sample_count`
    ///
    /// Both endpoints are sampled. The first sample reaching the maximum wins,
    /// so results are reproducible for identical input. There is no refinement
    /// between samples.
    #[must_use]
    pub fn max_perpendicular_distance(
        coefficients: &PolynomialCoefficients,
        baseline: &BaselineLine,
        x_min: f64,
        x_max: f64,
        sample_count: usize,
    ) -> DmaxPoint {
        let intervals = sample_count.max(1);
        let step = (x_max - x_min) / intervals as f64;

        let mut best = DmaxPoint {
            intensity: x_min,
            lactate: coefficients.evaluate(x_min),
            distance: f64::NEG_INFINITY,
        };
        for i in 0..=intervals {
            let x = (i as f64).mul_add(step, x_min);
            let y = coefficients.evaluate(x);
            let distance = baseline.distance_to(x, y);
            if distance > best.distance {
                best = DmaxPoint {
                    intensity: x,
                    lactate: y,
                    distance,
                };
            }
        }
        best
    }
}
