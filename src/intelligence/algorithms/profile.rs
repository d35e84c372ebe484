// ABOUTME: Athlete profile classification from early-stage lactate behaviour
// ABOUTME: Distinguishes standard curves from flat elite curves that need Modified D-max
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::ProfileConfig;
use lactate_core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape class of an athlete's lactate curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileType {
    /// Lactate rises early; standard D-max locates LT2
    Standard,
    /// Low, flat baseline for most of the test; standard D-max would find LT1
    EliteFlat,
}

impl ProfileType {
    /// Wire tag
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::EliteFlat => "ELITE_FLAT",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification result for one test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Profile class
    #[serde(rename = "type")]
    pub profile_type: ProfileType,
    /// Trimmed-mean lactate of the early stages (mmol/L)
    pub baseline_avg: f64,
    /// Least-squares slope of the early stages (mmol/L per stage)
    pub baseline_slope: f64,
    /// Highest lactate of the test
    pub max_lactate: f64,
    /// `max − min` lactate across all stages
    pub lactate_range: f64,
}

impl AthleteProfile {
    /// Whether Modified D-max should be preferred
    #[must_use]
    pub const fn is_elite_flat(&self) -> bool {
        matches!(self.profile_type, ProfileType::EliteFlat)
    }
}

/// Robust level and trend of the early stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineEstimate {
    /// Mean of the subset with its single highest value removed
    pub level: f64,
    /// Least-squares slope against stage index
    pub slope: f64,
    /// Number of leading stages in the subset
    pub stage_count: usize,
}

/// Profile classifier
pub struct AthleteProfileClassifier;

impl AthleteProfileClassifier {
    /// Estimate the baseline from the first `max(min_stages, floor(fraction·n))` stages
    ///
    /// The highest value of the subset is dropped before averaging so one early
    /// outlier cannot lift the level. The slope uses the full subset.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty series
    pub fn baseline(lactate: &[f64], config: &ProfileConfig) -> EngineResult<BaselineEstimate> {
        let n = lactate.len();
        if n == 0 {
            return Err(EngineError::insufficient_data("Baseline estimation", 1, 0));
        }

        let by_fraction = (config.baseline_stage_fraction * n as f64).floor() as usize;
        let stage_count = by_fraction.max(config.min_baseline_stages).min(n);
        let subset = &lactate[..stage_count];

        let level = if subset.len() >= 2 {
            let highest = subset
                .iter()
                .enumerate()
                .fold(0, |best, (i, v)| if *v > subset[best] { i } else { best });
            let kept_sum: f64 = subset
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != highest)
                .map(|(_, v)| v)
                .sum();
            kept_sum / (subset.len() - 1) as f64
        } else {
            subset[0]
        };

        Ok(BaselineEstimate {
            level,
            slope: Self::index_slope(subset),
            stage_count,
        })
    }

    /// Classify a lactate series
    ///
    /// `ELITE_FLAT` when the baseline is very low, or when it is low and the
    /// early slope is near zero.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty series
    pub fn classify(lactate: &[f64], config: &ProfileConfig) -> EngineResult<AthleteProfile> {
        let baseline = Self::baseline(lactate, config)?;
        let max_lactate = lactate.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_lactate = lactate.iter().copied().fold(f64::INFINITY, f64::min);

        let elite = baseline.level < config.very_low_baseline_mmol
            || (baseline.level <= config.elite_max_baseline_mmol
                && baseline.slope <= config.elite_max_baseline_slope);

        Ok(AthleteProfile {
            profile_type: if elite {
                ProfileType::EliteFlat
            } else {
                ProfileType::Standard
            },
            baseline_avg: baseline.level,
            baseline_slope: baseline.slope,
            max_lactate,
            lactate_range: max_lactate - min_lactate,
        })
    }

    fn index_slope(values: &[f64]) -> f64 {
        let n = values.len();
        if n < 2 {
            return 0.0;
        }
        let mean_x = (n - 1) as f64 / 2.0;
        let mean_y = values.iter().sum::<f64>() / n as f64;
        let (numerator, denominator) =
            values
                .iter()
                .enumerate()
                .fold((0.0, 0.0), |(num, den), (i, y)| {
                    let dx = i as f64 - mean_x;
                    (dx.mul_add(y - mean_y, num), dx.mul_add(dx, den))
                });
        if denominator <= f64::EPSILON {
            0.0
        } else {
            numerator / denominator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_curve_is_elite() {
        let profile = AthleteProfileClassifier::classify(
            &[0.9, 1.0, 1.0, 1.1, 1.3, 1.6],
            &ProfileConfig::default(),
        )
        .unwrap();
        assert_eq!(profile.profile_type, ProfileType::EliteFlat);
        assert!((profile.baseline_avg - 0.9).abs() < 1e-12);
        assert!((profile.lactate_range - 0.7).abs() < 1e-12);
        assert!((profile.max_lactate - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_knee_curve_is_standard() {
        let profile = AthleteProfileClassifier::classify(
            &[1.0, 1.2, 1.8, 2.9, 4.8, 7.5],
            &ProfileConfig::default(),
        )
        .unwrap();
        assert_eq!(profile.profile_type, ProfileType::Standard);
        assert!((profile.baseline_slope - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_very_low_baseline_is_elite_regardless_of_slope() {
        let profile = AthleteProfileClassifier::classify(
            &[0.5, 0.9, 1.5, 2.5, 4.0, 6.0],
            &ProfileConfig::default(),
        )
        .unwrap();
        assert_eq!(profile.profile_type, ProfileType::EliteFlat);
    }

    #[test]
    fn test_high_baseline_is_standard() {
        let profile = AthleteProfileClassifier::classify(
            &[1.8, 1.8, 1.9, 2.5, 3.8, 6.0],
            &ProfileConfig::default(),
        )
        .unwrap();
        assert_eq!(profile.profile_type, ProfileType::Standard);
    }

    #[test]
    fn test_trimmed_mean_drops_early_outlier() {
        // 10 stages: subset is the first 4, the 3.0 spike is dropped
        let lactate = [1.0, 3.0, 1.0, 1.0, 1.2, 1.5, 2.0, 3.0, 4.5, 6.5];
        let baseline =
            AthleteProfileClassifier::baseline(&lactate, &ProfileConfig::default()).unwrap();
        assert_eq!(baseline.stage_count, 4);
        assert!((baseline.level - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_stage_baseline() {
        let baseline =
            AthleteProfileClassifier::baseline(&[1.4], &ProfileConfig::default()).unwrap();
        assert_eq!(baseline.stage_count, 1);
        assert!((baseline.level - 1.4).abs() < f64::EPSILON);
        assert!(baseline.slope.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert!(AthleteProfileClassifier::classify(&[], &ProfileConfig::default()).is_err());
    }

    #[test]
    fn test_profile_serializes_with_type_tag() {
        let profile = AthleteProfileClassifier::classify(
            &[0.9, 1.0, 1.0, 1.1, 1.3, 1.6],
            &ProfileConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["type"], "ELITE_FLAT");
    }
}
