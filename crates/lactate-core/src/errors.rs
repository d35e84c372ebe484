// ABOUTME: Unified error type and error codes for lactate threshold computations
// ABOUTME: Covers insufficient data, array mismatches, invalid stages, and configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Hard input errors only. Poor curve fits, non-monotonic curves and missing
//! crossings are soft degradations: they surface as a lowered confidence and a
//! warning on the result, never as an `EngineError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Fewer stages than the requested method needs
    InsufficientData,
    /// Intensity, lactate and heart-rate columns differ in length
    ArrayLengthMismatch,
    /// A stage carries none of speed, power, or pace
    NoValidIntensityField,
    /// Stages of one test use different intensity units
    MixedUnits,
    /// Stages are not ordered by ascending intensity
    UnorderedStages,
    /// Malformed value (negative lactate, zero heart rate, NaN, ...)
    InvalidInput,
    /// Engine configuration failed validation
    ConfigInvalid,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InsufficientData => "Insufficient test data for the requested method",
            Self::ArrayLengthMismatch => "Test data arrays have unequal lengths",
            Self::NoValidIntensityField => "Stage has no speed, power, or pace value",
            Self::MixedUnits => "Stages of a single test use different intensity units",
            Self::UnorderedStages => "Stages are not ordered by ascending intensity",
            Self::InvalidInput => "The provided input is invalid",
            Self::ConfigInvalid => "Engine configuration is invalid",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .code.description())]
pub struct EngineError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

/// Result type alias for convenience
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Fewer stages than `required` were available for `method`
    #[must_use]
    pub fn insufficient_data(method: &str, required: usize, actual: usize) -> Self {
        Self::new(
            ErrorCode::InsufficientData,
            format!("{method} requires at least {required} stages, got {actual}"),
        )
    }

    /// Column lengths differ
    #[must_use]
    pub fn array_length_mismatch(intensity: usize, lactate: usize, heart_rate: usize) -> Self {
        Self::new(
            ErrorCode::ArrayLengthMismatch,
            format!(
                "intensity has {intensity} values, lactate has {lactate}, heart rate has {heart_rate}"
            ),
        )
    }

    /// Stage at `index` has no intensity field populated
    #[must_use]
    pub fn no_valid_intensity_field(index: usize) -> Self {
        Self::new(
            ErrorCode::NoValidIntensityField,
            format!("stage {index} has no speed, power, or pace"),
        )
    }

    /// Stage at `index` uses `found` while the test uses `expected`
    #[must_use]
    pub fn mixed_units(index: usize, expected: &str, found: &str) -> Self {
        Self::new(
            ErrorCode::MixedUnits,
            format!("stage {index} uses {found} but the test uses {expected}"),
        )
    }

    /// Stage at `index` breaks the ascending-intensity ordering
    #[must_use]
    pub fn unordered_stages(index: usize) -> Self {
        Self::new(
            ErrorCode::UnorderedStages,
            format!("stage {index} has lower intensity than stage {}", index.saturating_sub(1)),
        )
    }

    /// Invalid input value
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Whether callers should fall back to a cruder method
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self.code, ErrorCode::InsufficientData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_description() {
        let error = EngineError::insufficient_data("D-max", 4, 3);
        let text = error.to_string();
        assert!(text.starts_with("Insufficient test data"));
        assert!(text.contains("at least 4 stages, got 3"));
        assert!(error.is_insufficient_data());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ArrayLengthMismatch).unwrap();
        assert_eq!(json, "\"ARRAY_LENGTH_MISMATCH\"");
        let code: ErrorCode = serde_json::from_str("\"MIXED_UNITS\"").unwrap();
        assert_eq!(code, ErrorCode::MixedUnits);
    }
}
