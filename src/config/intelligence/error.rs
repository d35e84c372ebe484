// ABOUTME: Configuration error types for lactate threshold configuration validation
// ABOUTME: Defines error variants for invalid ranges, out-of-range values, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for threshold configuration validation.

use lactate_core::EngineError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Pair of values in the wrong order (e.g., band minimum above maximum)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for EngineError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
