// ABOUTME: Engine-wide constants organized by domain
// ABOUTME: Re-exports lactate physiology defaults used to seed configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Blood-lactate thresholds, fit-quality gates, and profile cutoffs
pub mod lactate;
