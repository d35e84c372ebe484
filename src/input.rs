// ABOUTME: JSON ingestion of step tests and engine configuration files
// ABOUTME: Accepts a bare stage array or a {"stages": [...]} document of raw stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::LactateThresholdConfig;
use lactate_core::{EngineError, EngineResult, RawTestStage, StepTest};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Accepted shapes of a step-test document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepTestDocument {
    Stages(Vec<RawTestStage>),
    Wrapped { stages: Vec<RawTestStage> },
}

impl StepTestDocument {
    fn into_stages(self) -> Vec<RawTestStage> {
        match self {
            Self::Stages(stages) | Self::Wrapped { stages } => stages,
        }
    }
}

/// Parse a step test from JSON
///
/// Stages without speed, power, or pace are dropped with a warning.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed JSON, otherwise the validation errors
/// of [`StepTest::from_raw`]
pub fn parse_step_test(json: &str) -> EngineResult<StepTest> {
    let document: StepTestDocument = serde_json::from_str(json)
        .map_err(|e| EngineError::invalid_input(format!("Invalid step test JSON: {e}")))?;
    StepTest::from_raw(&document.into_stages())
}

/// Read and parse a step test file
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read, otherwise the errors
/// of [`parse_step_test`]
pub fn load_step_test(path: &Path) -> EngineResult<StepTest> {
    let json = fs::read_to_string(path).map_err(|e| {
        EngineError::invalid_input(format!("Cannot read {}: {e}", path.display()))
    })?;
    parse_step_test(&json)
}

/// Read and validate an engine configuration file
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read, or `ConfigInvalid`
/// for malformed or inconsistent settings
pub fn load_config(path: &Path) -> EngineResult<LactateThresholdConfig> {
    let json = fs::read_to_string(path).map_err(|e| {
        EngineError::invalid_input(format!("Cannot read {}: {e}", path.display()))
    })?;
    Ok(LactateThresholdConfig::from_json(&json)?)
}

/// Configuration from a file when one is given, otherwise defaults plus
/// `LACTATE_*` environment overrides
///
/// # Errors
///
/// Returns the errors of [`load_config`], or `ConfigInvalid` for an
/// unparsable or inconsistent environment override
pub fn resolve_config(path: Option<&Path>) -> EngineResult<LactateThresholdConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(LactateThresholdConfig::load()?),
    }
}
