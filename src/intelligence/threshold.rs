// ABOUTME: Threshold result record, method tags, and confidence grades shared by every detector
// ABOUTME: The engine's universal output shape for aerobic (LT1) and anaerobic (LT2) thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::algorithms::polynomial::PolynomialCoefficients;
use super::algorithms::profile::ProfileType;
use lactate_core::{EngineError, IntensityUnit, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Algorithm that produced a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThresholdMethod {
    /// Standard D-max on the first-to-last chord
    #[serde(rename = "DMAX")]
    Dmax,
    /// Bishop Modified D-max on the re-anchored chord
    #[serde(rename = "MOD_DMAX")]
    ModifiedDmax,
    /// Fixed 4.0 mmol/L crossing or nearest-stage estimate
    #[serde(rename = "FALLBACK")]
    Fallback,
    /// Midpoint of the first steep consecutive-stage rise
    #[serde(rename = "EXPONENTIAL_RISE")]
    ExponentialRise,
    /// Nearest stage to baseline + 0.3 mmol/L (elite LT1)
    #[serde(rename = "BASELINE_PLUS_0.3")]
    BaselinePlusLt1,
    /// Interpolation at minimum lactate + 1.0 mmol/L (LT2)
    #[serde(rename = "BASELINE_PLUS_1.0")]
    BaselinePlusLt2,
    /// Interpolation at the fixed 2.0 mmol/L concentration
    #[serde(rename = "LINEAR_2.0")]
    FixedLinear,
    /// Supplied by an injected ensemble LT1 detector
    #[serde(rename = "ENSEMBLE_LT1")]
    EnsembleLt1,
}

impl ThresholdMethod {
    /// Wire tag
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dmax => "DMAX",
            Self::ModifiedDmax => "MOD_DMAX",
            Self::Fallback => "FALLBACK",
            Self::ExponentialRise => "EXPONENTIAL_RISE",
            Self::BaselinePlusLt1 => "BASELINE_PLUS_0.3",
            Self::BaselinePlusLt2 => "BASELINE_PLUS_1.0",
            Self::FixedLinear => "LINEAR_2.0",
            Self::EnsembleLt1 => "ENSEMBLE_LT1",
        }
    }

    /// Get method description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Dmax => "Maximum distance between cubic lactate curve and first-to-last chord",
            Self::ModifiedDmax => {
                "Maximum distance to the chord starting before the first 0.4 mmol/L rise"
            }
            Self::Fallback => "Fixed 4.0 mmol/L crossing or nearest-stage estimate",
            Self::ExponentialRise => "Midpoint of the first consecutive rise above 0.5 mmol/L",
            Self::BaselinePlusLt1 => "Stage nearest to baseline + 0.3 mmol/L",
            Self::BaselinePlusLt2 => "Interpolated at minimum lactate + 1.0 mmol/L",
            Self::FixedLinear => "Interpolated at 2.0 mmol/L",
            Self::EnsembleLt1 => "Ensemble LT1 detector",
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DMAX" => Ok(Self::Dmax),
            "MOD_DMAX" | "MODIFIED_DMAX" => Ok(Self::ModifiedDmax),
            "FALLBACK" => Ok(Self::Fallback),
            "EXPONENTIAL_RISE" => Ok(Self::ExponentialRise),
            "BASELINE_PLUS_0.3" => Ok(Self::BaselinePlusLt1),
            "BASELINE_PLUS_1.0" => Ok(Self::BaselinePlusLt2),
            "LINEAR_2.0" => Ok(Self::FixedLinear),
            "ENSEMBLE_LT1" => Ok(Self::EnsembleLt1),
            other => Err(EngineError::invalid_input(format!(
                "Unknown threshold method: '{other}'. Valid options: DMAX, MOD_DMAX, FALLBACK, EXPONENTIAL_RISE, BASELINE_PLUS_0.3, BASELINE_PLUS_1.0, LINEAR_2.0, ENSEMBLE_LT1"
            ))),
        }
    }
}

/// Confidence grade of a threshold estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    /// Poor fit, near-linear curve, or crude estimate
    Low,
    /// Usable estimate
    Medium,
    /// Good fit with a pronounced turn point
    High,
}

/// A detected threshold point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// Intensity at the threshold, in `unit`
    pub intensity: f64,
    /// Lactate at the threshold (mmol/L)
    pub lactate: f64,
    /// Heart rate at the threshold (bpm), interpolated
    pub heart_rate: f64,
    /// Intensity unit of the test
    pub unit: IntensityUnit,
    /// Algorithm that produced this point
    pub method: ThresholdMethod,
    /// Confidence grade
    pub confidence: Confidence,
    /// R² of the cubic fit, for fit-based methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_squared: Option<f64>,
    /// Fitted cubic, for fit-based methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<PolynomialCoefficients>,
    /// Perpendicular distance at the D-max point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmax_distance: Option<f64>,
    /// Caveat when a fallback fired or data quality is doubtful
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Athlete profile the resolver classified the test as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<ProfileType>,
}

impl ThresholdResult {
    /// Create a result without fit details
    #[must_use]
    pub const fn new(
        intensity: f64,
        lactate: f64,
        heart_rate: f64,
        unit: IntensityUnit,
        method: ThresholdMethod,
        confidence: Confidence,
    ) -> Self {
        Self {
            intensity,
            lactate,
            heart_rate,
            unit,
            method,
            confidence,
            r_squared: None,
            coefficients: None,
            dmax_distance: None,
            warning: None,
            profile_type: None,
        }
    }

    /// Threshold intensity as a unit-tagged quantity
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        Quantity::new(self.intensity, self.unit)
    }

    /// Append a caveat, keeping earlier ones
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        let warning = warning.into();
        self.warning = Some(match self.warning.take() {
            Some(existing) => format!("{existing}; {warning}"),
            None => warning,
        });
        self
    }

    /// Tag the result with the classified profile
    #[must_use]
    pub fn with_profile(mut self, profile_type: ProfileType) -> Self {
        self.profile_type = Some(profile_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tags_round_trip_through_from_str() {
        for method in [
            ThresholdMethod::Dmax,
            ThresholdMethod::ModifiedDmax,
            ThresholdMethod::Fallback,
            ThresholdMethod::ExponentialRise,
            ThresholdMethod::BaselinePlusLt1,
            ThresholdMethod::BaselinePlusLt2,
            ThresholdMethod::FixedLinear,
            ThresholdMethod::EnsembleLt1,
        ] {
            assert_eq!(method.name().parse::<ThresholdMethod>().unwrap(), method);
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.name()));
        }
        assert!("bogus".parse::<ThresholdMethod>().is_err());
    }

    #[test]
    fn test_warnings_accumulate() {
        let result = ThresholdResult::new(
            12.0,
            2.0,
            150.0,
            IntensityUnit::KmPerHour,
            ThresholdMethod::FixedLinear,
            Confidence::Medium,
        )
        .with_warning("first")
        .with_warning("second");
        assert_eq!(result.warning.as_deref(), Some("first; second"));
        assert_eq!(result.quantity(), Quantity::Speed(12.0));
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert_eq!(
            serde_json::to_string(&Confidence::Medium).unwrap(),
            "\"MEDIUM\""
        );
    }
}
