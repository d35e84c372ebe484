// ABOUTME: Configuration module for the lactate threshold engine
// ABOUTME: Re-exports the threshold configuration and its validation error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Lactate threshold algorithm configuration (fit gates, profile cutoffs, fallbacks)
pub mod intelligence;

pub use intelligence::{ConfigError, LactateThresholdConfig};
