// ABOUTME: JSON documents printed by the command-line front end
// ABOUTME: Wraps single and batch threshold reports and renders them pretty or compact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::intelligence::ThresholdReport;
use lactate_core::EngineResult;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Document for a single analysis
///
/// Without zones this is the bare report. With zones the report moves under
/// `report` next to `training_zones`, which is `null` when the thresholds do
/// not bound a middle zone.
#[must_use]
pub fn analysis_output(report: &ThresholdReport, zones: bool) -> Value {
    if zones {
        json!({
            "report": report,
            "training_zones": report.training_zones(),
        })
    } else {
        json!(report)
    }
}

/// Document for a batch analysis, one entry per input file in input order
///
/// A failed analysis carries its error message instead of a report.
#[must_use]
pub fn batch_output(files: &[PathBuf], outcomes: Vec<EngineResult<ThresholdReport>>) -> Value {
    let entries: Vec<Value> = files
        .iter()
        .zip(outcomes)
        .map(|(path, outcome)| {
            let file = path.display().to_string();
            match outcome {
                Ok(report) => json!({ "file": file, "report": report }),
                Err(error) => json!({ "file": file, "error": error.to_string() }),
            }
        })
        .collect();
    Value::Array(entries)
}

/// Render any serializable value as pretty or single-line JSON
///
/// # Errors
///
/// Returns an error if the value cannot be serialized
pub fn render_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}
