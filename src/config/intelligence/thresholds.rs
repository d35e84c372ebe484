// ABOUTME: Tunable constants for lactate curve fitting, confidence grading, and fallbacks
// ABOUTME: Groups every numeric cutoff of the threshold engine into named configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use lactate_core::constants::lactate::{dmax, fallback, fixed, modified_dmax, profile, quality};
use serde::{Deserialize, Serialize};

/// Cubic fit gating and geometric search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveFitConfig {
    /// Minimum stages for D-max and Modified D-max
    pub min_dmax_stages: usize,
    /// Fits below this R² trigger the fixed 4.0 mmol/L fallback
    pub min_r_squared: f64,
    /// R² required for HIGH confidence
    pub high_confidence_r_squared: f64,
    /// Samples taken across the search interval
    pub sample_count: usize,
}

impl Default for CurveFitConfig {
    fn default() -> Self {
        Self {
            min_dmax_stages: dmax::MIN_STAGES,
            min_r_squared: dmax::MIN_R_SQUARED,
            high_confidence_r_squared: dmax::HIGH_CONFIDENCE_R_SQUARED,
            sample_count: dmax::SAMPLE_COUNT,
        }
    }
}

/// Relative D-max distance cutoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Below this relative distance the curve is too linear to trust
    pub low_relative_distance: f64,
    /// At or above this relative distance (with a good fit) confidence is HIGH
    pub high_relative_distance: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            low_relative_distance: dmax::LOW_RELATIVE_DISTANCE,
            high_relative_distance: dmax::HIGH_RELATIVE_DISTANCE,
        }
    }
}

/// Baseline estimation and athlete profile cutoffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Fraction of stages treated as the early baseline subset
    pub baseline_stage_fraction: f64,
    /// Minimum size of the baseline subset
    pub min_baseline_stages: usize,
    /// Rise above baseline level (mmol/L) marking the Modified D-max anchor
    pub rise_threshold_mmol: f64,
    /// Baseline level at or below which a flat slope marks an elite curve
    pub elite_max_baseline_mmol: f64,
    /// Early slope (mmol/L per stage) at or below which the curve counts as flat
    pub elite_max_baseline_slope: f64,
    /// Baseline level below which a curve is elite regardless of slope
    pub very_low_baseline_mmol: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            baseline_stage_fraction: modified_dmax::BASELINE_STAGE_FRACTION,
            min_baseline_stages: modified_dmax::MIN_BASELINE_STAGES,
            rise_threshold_mmol: modified_dmax::RISE_THRESHOLD_MMOL,
            elite_max_baseline_mmol: profile::ELITE_MAX_BASELINE_MMOL,
            elite_max_baseline_slope: profile::ELITE_MAX_BASELINE_SLOPE,
            very_low_baseline_mmol: profile::VERY_LOW_BASELINE_MMOL,
        }
    }
}

/// Fallback hierarchy targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Consecutive-stage delta marking exponential rise onset
    pub exponential_rise_delta_mmol: f64,
    /// Minimum stages for exponential-rise detection
    pub min_exponential_rise_stages: usize,
    /// LT1 target above baseline for elite-flat athletes
    pub baseline_plus_lt1_mmol: f64,
    /// LT2 target above minimum lactate
    pub baseline_plus_lt2_mmol: f64,
    /// Floor for the baseline + 1.0 LT2 target
    pub lt2_min_target_mmol: f64,
    /// Fixed LT1 concentration
    pub aerobic_target_mmol: f64,
    /// Fixed LT2 concentration
    pub anaerobic_target_mmol: f64,
    /// Lower bound for accepting a D-max point as LT1
    pub aerobic_band_min_mmol: f64,
    /// Upper bound for accepting a D-max point as LT1
    pub aerobic_band_max_mmol: f64,
    /// Data points required before consulting the ensemble LT1 detector
    pub min_lt1_ensemble_points: usize,
    /// A later 4.0 mmol/L crossing counts as second only beyond this stage gap
    pub second_crossing_min_gap: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            exponential_rise_delta_mmol: fallback::EXPONENTIAL_RISE_DELTA_MMOL,
            min_exponential_rise_stages: fallback::MIN_EXPONENTIAL_RISE_STAGES,
            baseline_plus_lt1_mmol: fallback::BASELINE_PLUS_LT1_MMOL,
            baseline_plus_lt2_mmol: fallback::BASELINE_PLUS_LT2_MMOL,
            lt2_min_target_mmol: fallback::LT2_MIN_TARGET_MMOL,
            aerobic_target_mmol: fixed::AEROBIC_THRESHOLD_MMOL,
            anaerobic_target_mmol: fixed::ANAEROBIC_THRESHOLD_MMOL,
            aerobic_band_min_mmol: fixed::AEROBIC_BAND_MIN_MMOL,
            aerobic_band_max_mmol: fixed::AEROBIC_BAND_MAX_MMOL,
            min_lt1_ensemble_points: fallback::MIN_LT1_ENSEMBLE_POINTS,
            second_crossing_min_gap: fallback::SECOND_CROSSING_MIN_GAP,
        }
    }
}

/// Lactate curve quality checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataQualityConfig {
    /// Largest tolerated retrograde dip between consecutive stages
    pub dip_tolerance_mmol: f64,
    /// Tolerated number of retrograde dips
    pub max_monotonic_violations: usize,
}

impl Default for DataQualityConfig {
    fn default() -> Self {
        Self {
            dip_tolerance_mmol: quality::DIP_TOLERANCE_MMOL,
            max_monotonic_violations: quality::MAX_MONOTONIC_VIOLATIONS,
        }
    }
}
