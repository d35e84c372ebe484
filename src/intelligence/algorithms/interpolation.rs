// ABOUTME: Piecewise-linear interpolation over test stages for fixed-lactate methods
// ABOUTME: Finds upward lactate crossings, interpolates intensity and heart rate, picks nearest stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use lactate_core::StepTest;

/// Intensity and heart rate at an interpolated lactate concentration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedPoint {
    /// Interpolated intensity
    pub intensity: f64,
    /// Target lactate (mmol/L)
    pub lactate: f64,
    /// Interpolated heart rate (bpm)
    pub heart_rate: f64,
}

/// Stage-array interpolation helpers
pub struct StageInterpolator;

impl StageInterpolator {
    /// Heart rate at `intensity`, linear between the bracketing stages
    ///
    /// Works for ascending (speed, power) and descending (pace) intensity
    /// columns. Outside the tested range the nearest end stage is used.
    #[must_use]
    pub fn interpolate_heart_rate(test: &StepTest, intensity: f64) -> f64 {
        let xs = test.intensities();
        let hrs = test.heart_rates();
        let (Some(&first_x), Some(&last_x)) = (xs.first(), xs.last()) else {
            return 0.0;
        };
        let (Some(&first_hr), Some(&last_hr)) = (hrs.first(), hrs.last()) else {
            return 0.0;
        };

        let ascending = last_x >= first_x;
        let before_start = if ascending {
            intensity <= first_x
        } else {
            intensity >= first_x
        };
        if before_start {
            return first_hr;
        }

        for i in 0..xs.len().saturating_sub(1) {
            let (x0, x1) = (xs[i], xs[i + 1]);
            let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
            if intensity >= lo && intensity <= hi {
                let span = x1 - x0;
                if span.abs() <= f64::EPSILON {
                    return hrs[i];
                }
                let fraction = (intensity - x0) / span;
                return fraction.mul_add(hrs[i + 1] - hrs[i], hrs[i]);
            }
        }
        last_hr
    }

    /// Indices `i` with `lactate[i] < target ≤ lactate[i + 1]`
    #[must_use]
    pub fn upward_crossings(lactate: &[f64], target: f64) -> Vec<usize> {
        lactate
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] < target && target <= pair[1])
            .map(|(i, _)| i)
            .collect()
    }

    /// Interpolate between stage `index` and `index + 1` at `target` lactate
    ///
    /// Returns `None` when `index + 1` is out of range.
    #[must_use]
    pub fn interpolate_at_crossing(
        test: &StepTest,
        index: usize,
        target: f64,
    ) -> Option<InterpolatedPoint> {
        let stages = test.stages();
        let (lower, upper) = (stages.get(index)?, stages.get(index + 1)?);

        let rise = upper.lactate - lower.lactate;
        let fraction = if rise.abs() <= f64::EPSILON {
            0.0
        } else {
            (target - lower.lactate) / rise
        };
        let (x0, x1) = (lower.intensity.value(), upper.intensity.value());
        let (hr0, hr1) = (f64::from(lower.heart_rate), f64::from(upper.heart_rate));

        Some(InterpolatedPoint {
            intensity: fraction.mul_add(x1 - x0, x0),
            lactate: target,
            heart_rate: fraction.mul_add(hr1 - hr0, hr0),
        })
    }

    /// Interpolate at the first upward crossing of `target`
    #[must_use]
    pub fn interpolate_at_lactate(test: &StepTest, target: f64) -> Option<InterpolatedPoint> {
        let first = *Self::upward_crossings(&test.lactates(), target).first()?;
        Self::interpolate_at_crossing(test, first, target)
    }

    /// Stage whose lactate is closest to `target`; earliest wins ties
    #[must_use]
    pub fn nearest_stage(lactate: &[f64], target: f64) -> Option<usize> {
        lactate
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| {
                let gap = (v - target).abs();
                match best {
                    Some((_, best_gap)) if best_gap <= gap => best,
                    _ => Some((i, gap)),
                }
            })
            .map(|(i, _)| i)
    }
}
