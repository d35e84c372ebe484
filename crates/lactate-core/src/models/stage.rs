// ABOUTME: Step-test stage model with a unit-carrying intensity quantity
// ABOUTME: Converts raw speed/power/pace records into typed stages once, at ingestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of the intensity quantity used by a whole test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntensityUnit {
    /// Running or treadmill speed
    #[serde(rename = "km/h")]
    KmPerHour,
    /// Cycling or rowing power
    #[serde(rename = "watt")]
    Watt,
    /// Running pace
    #[serde(rename = "min/km")]
    MinPerKm,
}

impl IntensityUnit {
    /// Display symbol, identical to the serialized form
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::KmPerHour => "km/h",
            Self::Watt => "watt",
            Self::MinPerKm => "min/km",
        }
    }

    /// Whether a numerically smaller value means a higher intensity
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::MinPerKm)
    }
}

impl fmt::Display for IntensityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Exertion intensity of a stage, tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Speed in km/h
    Speed(f64),
    /// Power in watts
    Power(f64),
    /// Pace in min/km
    Pace(f64),
}

impl Quantity {
    /// Build a quantity from a raw value and its unit
    #[must_use]
    pub const fn new(value: f64, unit: IntensityUnit) -> Self {
        match unit {
            IntensityUnit::KmPerHour => Self::Speed(value),
            IntensityUnit::Watt => Self::Power(value),
            IntensityUnit::MinPerKm => Self::Pace(value),
        }
    }

    /// Raw numeric value in this quantity's unit
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Speed(v) | Self::Power(v) | Self::Pace(v) => v,
        }
    }

    /// Unit tag
    #[must_use]
    pub const fn unit(self) -> IntensityUnit {
        match self {
            Self::Speed(_) => IntensityUnit::KmPerHour,
            Self::Power(_) => IntensityUnit::Watt,
            Self::Pace(_) => IntensityUnit::MinPerKm,
        }
    }
}

/// One step of an incremental test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestStage {
    /// Exertion intensity
    pub intensity: Quantity,
    /// Blood lactate (mmol/L)
    pub lactate: f64,
    /// Heart rate (bpm)
    pub heart_rate: u32,
}

impl TestStage {
    /// Create a stage
    #[must_use]
    pub const fn new(intensity: Quantity, lactate: f64, heart_rate: u32) -> Self {
        Self {
            intensity,
            lactate,
            heart_rate,
        }
    }
}

/// Stage as delivered by an ingestion layer, before unit dispatch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTestStage {
    /// Speed in km/h
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Power in watts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    /// Pace in min/km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    /// Blood lactate (mmol/L)
    pub lactate: f64,
    /// Heart rate (bpm)
    #[serde(alias = "heartRate")]
    pub heart_rate: u32,
}

impl RawTestStage {
    /// Resolve the populated intensity field into a typed stage
    ///
    /// Speed wins over power, power over pace.
    ///
    /// # Errors
    ///
    /// Returns `NoValidIntensityField` when none of speed, power, or pace is set
    pub fn to_stage(&self, index: usize) -> EngineResult<TestStage> {
        let intensity = self
            .speed
            .map(Quantity::Speed)
            .or_else(|| self.power.map(Quantity::Power))
            .or_else(|| self.pace.map(Quantity::Pace))
            .ok_or_else(|| EngineError::no_valid_intensity_field(index))?;

        Ok(TestStage::new(intensity, self.lactate, self.heart_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_raw_stage_prefers_speed() {
        let raw = RawTestStage {
            speed: Some(12.0),
            power: Some(250.0),
            pace: None,
            lactate: 1.4,
            heart_rate: 150,
        };
        let stage = raw.to_stage(0).unwrap();
        assert_eq!(stage.intensity, Quantity::Speed(12.0));
        assert_eq!(stage.intensity.unit(), IntensityUnit::KmPerHour);
    }

    #[test]
    fn test_raw_stage_without_intensity() {
        let raw = RawTestStage {
            lactate: 1.0,
            heart_rate: 120,
            ..RawTestStage::default()
        };
        let err = raw.to_stage(3).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoValidIntensityField);
        assert!(err.message.contains("stage 3"));
    }

    #[test]
    fn test_unit_serialization() {
        assert_eq!(
            serde_json::to_string(&IntensityUnit::MinPerKm).unwrap(),
            "\"min/km\""
        );
        let quantity: Quantity = serde_json::from_str(r#"{"power": 240.0}"#).unwrap();
        assert_eq!(quantity, Quantity::Power(240.0));
    }
}
