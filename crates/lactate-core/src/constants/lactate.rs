// ABOUTME: Physiological constants for lactate threshold detection from incremental step tests
// ABOUTME: Fixed lactate targets, D-max fit gates, Bishop rise thresholds, and elite profile cutoffs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Lactate threshold constants based on sports science research
//!
//! These values seed `LactateThresholdConfig`; every one of them can be
//! overridden at runtime.
//!
//! References:
//! - Cheng, B. et al. (1992). "A new approach for the determination of ventilatory and lactate thresholds."
//!   *International Journal of Sports Medicine*, 13(7), 518-522.
//! - Bishop, D., Jenkins, D.G., & Mackinnon, L.T. (1998). "The relationship between plasma lactate
//!   parameters, Wpeak and 1-h cycling performance in women." *Med Sci Sports Exerc*, 30(8), 1270-1275.
//! - Faude, O., Kindermann, W., & Meyer, T. (2009). "Lactate threshold concepts."
//!   *Sports Medicine*, 39(6), 469-490.

/// Fixed blood-lactate concentrations (mmol/L)
pub mod fixed {
    /// Aerobic threshold (LT1) fixed concentration
    /// Reference: Kindermann, W. et al. (1979). Eur J Appl Physiol, 42(1), 25-34.
    pub const AEROBIC_THRESHOLD_MMOL: f64 = 2.0;

    /// Anaerobic threshold (LT2, OBLA) fixed concentration
    /// Reference: Heck, H. et al. (1985). Int J Sports Med, 6(3), 117-130.
    pub const ANAEROBIC_THRESHOLD_MMOL: f64 = 4.0;

    /// Lower bound of the physiologically plausible LT1 band
    pub const AEROBIC_BAND_MIN_MMOL: f64 = 1.5;

    /// Upper bound of the physiologically plausible LT1 band
    pub const AEROBIC_BAND_MAX_MMOL: f64 = 2.5;
}

/// Curve fitting and D-max search
pub mod dmax {
    /// Minimum stages for any D-max-family method (cubic fit is under-determined below 4 points)
    pub const MIN_STAGES: usize = 4;

    /// Fits below this R² are distrusted and replaced by the fixed 4.0 mmol/L fallback
    pub const MIN_R_SQUARED: f64 = 0.90;

    /// R² required (together with a pronounced distance) for HIGH confidence
    pub const HIGH_CONFIDENCE_R_SQUARED: f64 = 0.95;

    /// Equally spaced samples evaluated by the geometric search
    pub const SAMPLE_COUNT: usize = 1000;

    /// D-max distance relative to lactate range below which the curve is treated as linear
    pub const LOW_RELATIVE_DISTANCE: f64 = 0.05;

    /// D-max distance relative to lactate range required for HIGH confidence
    pub const HIGH_RELATIVE_DISTANCE: f64 = 0.10;
}

/// Bishop Modified D-max baseline detection
pub mod modified_dmax {
    /// Fraction of the test treated as early (baseline) stages
    pub const BASELINE_STAGE_FRACTION: f64 = 0.4;

    /// Minimum number of early stages used for the baseline level
    pub const MIN_BASELINE_STAGES: usize = 2;

    /// Rise above baseline level (mmol/L) marking the first significant increase
    /// Reference: Bishop et al. (1998) use a 0.4 mmol/L rise above baseline
    pub const RISE_THRESHOLD_MMOL: f64 = 0.4;
}

/// Athlete profile classification
pub mod profile {
    /// Baseline level (mmol/L) at or below which a flat early slope marks an elite curve
    pub const ELITE_MAX_BASELINE_MMOL: f64 = 1.2;

    /// Early-stage slope (mmol/L per stage) at or below which the curve counts as flat
    pub const ELITE_MAX_BASELINE_SLOPE: f64 = 0.15;

    /// Baseline level (mmol/L) below which a curve is elite regardless of slope
    pub const VERY_LOW_BASELINE_MMOL: f64 = 0.8;
}

/// Fallback hierarchy targets and deltas
pub mod fallback {
    /// Consecutive-stage lactate delta (mmol/L) marking exponential rise onset
    pub const EXPONENTIAL_RISE_DELTA_MMOL: f64 = 0.5;

    /// Minimum stages for exponential-rise detection
    pub const MIN_EXPONENTIAL_RISE_STAGES: usize = 3;

    /// LT1 target above baseline for elite-flat athletes (mmol/L)
    pub const BASELINE_PLUS_LT1_MMOL: f64 = 0.3;

    /// LT2 target above minimum lactate (mmol/L)
    pub const BASELINE_PLUS_LT2_MMOL: f64 = 1.0;

    /// Floor for the baseline + 1.0 LT2 target (mmol/L)
    pub const LT2_MIN_TARGET_MMOL: f64 = 2.0;

    /// Minimum data points before the ensemble LT1 detector is consulted
    pub const MIN_LT1_ENSEMBLE_POINTS: usize = 5;

    /// Stage gap after the first 4.0 mmol/L crossing before a later crossing counts as second
    pub const SECOND_CROSSING_MIN_GAP: usize = 1;
}

/// Data quality checks
pub mod quality {
    /// Retrograde lactate dip (mmol/L) tolerated between consecutive stages
    pub const DIP_TOLERANCE_MMOL: f64 = 0.2;

    /// Tolerated number of retrograde dips before the curve is flagged unreliable
    pub const MAX_MONOTONIC_VIOLATIONS: usize = 1;
}
