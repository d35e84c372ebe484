// ABOUTME: Lactate threshold configuration for curve fitting, profiling, and fallback selection
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Threshold Configuration Module
//!
//! Every numeric cutoff used by the engine lives here as a named, overridable
//! value instead of an inline literal.
//!
//! # Module Structure
//!
//! - `thresholds` - fit gates, confidence cutoffs, profile cutoffs, fallback targets
//! - `error` - validation and parse errors
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export LACTATE_MIN_R_SQUARED=0.92
//!    export LACTATE_RISE_THRESHOLD_MMOL=0.5
//!    ```
//!
//! 2. JSON (all fields optional, missing fields use defaults)
//!
//! 3. Default values from `lactate_core::constants::lactate`

/// Validation and parse errors
pub mod error;
/// Fit gates, confidence cutoffs, profile cutoffs, and fallback targets
pub mod thresholds;

pub use error::ConfigError;
pub use thresholds::{
    ConfidenceConfig, CurveFitConfig, DataQualityConfig, FallbackConfig, ProfileConfig,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LactateThresholdConfig {
    /// Cubic fit gating and geometric search
    pub curve_fit: CurveFitConfig,
    /// Relative-distance confidence cutoffs
    pub confidence: ConfidenceConfig,
    /// Baseline estimation and athlete profile cutoffs
    pub profile: ProfileConfig,
    /// Fallback hierarchy targets
    pub fallback: FallbackConfig,
    /// Lactate curve quality checks
    pub data_quality: DataQualityConfig,
}

impl LactateThresholdConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document, then validate it
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON, or a validation error
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_curve_fit()?;
        self.validate_profile()?;
        self.validate_fallback()?;

        if self.data_quality.dip_tolerance_mmol < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "dip_tolerance_mmol must be non-negative",
            ));
        }
        Ok(())
    }

    fn validate_curve_fit(&self) -> Result<(), ConfigError> {
        let fit = &self.curve_fit;
        if fit.min_dmax_stages < 4 {
            return Err(ConfigError::ValueOutOfRange(
                "min_dmax_stages must be at least 4 for a cubic fit",
            ));
        }
        if !(0.0..=1.0).contains(&fit.min_r_squared)
            || !(0.0..=1.0).contains(&fit.high_confidence_r_squared)
        {
            return Err(ConfigError::ValueOutOfRange(
                "R-squared thresholds must be between 0 and 1",
            ));
        }
        if fit.min_r_squared > fit.high_confidence_r_squared {
            return Err(ConfigError::InvalidRange(
                "min_r_squared must be <= high_confidence_r_squared",
            ));
        }
        if fit.sample_count < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "sample_count must be at least 2",
            ));
        }

        let confidence = &self.confidence;
        if confidence.low_relative_distance < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "low_relative_distance must be non-negative",
            ));
        }
        if confidence.low_relative_distance > confidence.high_relative_distance {
            return Err(ConfigError::InvalidRange(
                "low_relative_distance must be <= high_relative_distance",
            ));
        }
        Ok(())
    }

    fn validate_profile(&self) -> Result<(), ConfigError> {
        let profile = &self.profile;
        if profile.baseline_stage_fraction <= 0.0 || profile.baseline_stage_fraction > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "baseline_stage_fraction must be in (0, 1]",
            ));
        }
        if profile.min_baseline_stages < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_baseline_stages must be at least 2",
            ));
        }
        if profile.rise_threshold_mmol <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "rise_threshold_mmol must be positive",
            ));
        }
        if profile.very_low_baseline_mmol > profile.elite_max_baseline_mmol {
            return Err(ConfigError::InvalidRange(
                "very_low_baseline_mmol must be <= elite_max_baseline_mmol",
            ));
        }
        Ok(())
    }

    fn validate_fallback(&self) -> Result<(), ConfigError> {
        let fallback = &self.fallback;
        if fallback.exponential_rise_delta_mmol <= 0.0
            || fallback.baseline_plus_lt1_mmol <= 0.0
            || fallback.baseline_plus_lt2_mmol <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "lactate deltas must be positive",
            ));
        }
        if fallback.min_exponential_rise_stages < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_exponential_rise_stages must be at least 2",
            ));
        }
        if fallback.aerobic_band_min_mmol > fallback.aerobic_band_max_mmol {
            return Err(ConfigError::InvalidRange(
                "aerobic_band_min_mmol must be <= aerobic_band_max_mmol",
            ));
        }
        if fallback.aerobic_target_mmol >= fallback.anaerobic_target_mmol {
            return Err(ConfigError::InvalidRange(
                "aerobic_target_mmol must be < anaerobic_target_mmol",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    // Long function: Systematic env var parsing for every tunable value
    #[allow(clippy::too_many_lines)]
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Curve fit
        Self::apply_env_var(
            "LACTATE_MIN_DMAX_STAGES",
            &mut self.curve_fit.min_dmax_stages,
        )?;
        Self::apply_env_var("LACTATE_MIN_R_SQUARED", &mut self.curve_fit.min_r_squared)?;
        Self::apply_env_var(
            "LACTATE_HIGH_CONFIDENCE_R_SQUARED",
            &mut self.curve_fit.high_confidence_r_squared,
        )?;
        Self::apply_env_var("LACTATE_SAMPLE_COUNT", &mut self.curve_fit.sample_count)?;

        // Confidence
        Self::apply_env_var(
            "LACTATE_LOW_RELATIVE_DISTANCE",
            &mut self.confidence.low_relative_distance,
        )?;
        Self::apply_env_var(
            "LACTATE_HIGH_RELATIVE_DISTANCE",
            &mut self.confidence.high_relative_distance,
        )?;

        // Profile
        Self::apply_env_var(
            "LACTATE_BASELINE_STAGE_FRACTION",
            &mut self.profile.baseline_stage_fraction,
        )?;
        Self::apply_env_var(
            "LACTATE_MIN_BASELINE_STAGES",
            &mut self.profile.min_baseline_stages,
        )?;
        Self::apply_env_var(
            "LACTATE_RISE_THRESHOLD_MMOL",
            &mut self.profile.rise_threshold_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_ELITE_MAX_BASELINE_MMOL",
            &mut self.profile.elite_max_baseline_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_ELITE_MAX_BASELINE_SLOPE",
            &mut self.profile.elite_max_baseline_slope,
        )?;
        Self::apply_env_var(
            "LACTATE_VERY_LOW_BASELINE_MMOL",
            &mut self.profile.very_low_baseline_mmol,
        )?;

        // Fallbacks
        Self::apply_env_var(
            "LACTATE_EXPONENTIAL_RISE_DELTA_MMOL",
            &mut self.fallback.exponential_rise_delta_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_MIN_EXPONENTIAL_RISE_STAGES",
            &mut self.fallback.min_exponential_rise_stages,
        )?;
        Self::apply_env_var(
            "LACTATE_BASELINE_PLUS_LT1_MMOL",
            &mut self.fallback.baseline_plus_lt1_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_BASELINE_PLUS_LT2_MMOL",
            &mut self.fallback.baseline_plus_lt2_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_LT2_MIN_TARGET_MMOL",
            &mut self.fallback.lt2_min_target_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_AEROBIC_TARGET_MMOL",
            &mut self.fallback.aerobic_target_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_ANAEROBIC_TARGET_MMOL",
            &mut self.fallback.anaerobic_target_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_AEROBIC_BAND_MIN_MMOL",
            &mut self.fallback.aerobic_band_min_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_AEROBIC_BAND_MAX_MMOL",
            &mut self.fallback.aerobic_band_max_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_MIN_LT1_ENSEMBLE_POINTS",
            &mut self.fallback.min_lt1_ensemble_points,
        )?;
        Self::apply_env_var(
            "LACTATE_SECOND_CROSSING_MIN_GAP",
            &mut self.fallback.second_crossing_min_gap,
        )?;

        // Data quality
        Self::apply_env_var(
            "LACTATE_DIP_TOLERANCE_MMOL",
            &mut self.data_quality.dip_tolerance_mmol,
        )?;
        Self::apply_env_var(
            "LACTATE_MAX_MONOTONIC_VIOLATIONS",
            &mut self.data_quality.max_monotonic_violations,
        )?;

        Ok(self)
    }
}
