// ABOUTME: Injectable observability hook for threshold computations
// ABOUTME: Typed analysis events delivered to a tracing-backed or no-op observer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis events are a side channel only: results never depend on which
//! observer is installed.

use super::algorithms::profile::AthleteProfile;
use super::threshold::{Confidence, ThresholdMethod};
use tracing::{debug, info, warn};

/// Diagnostic event emitted while computing a threshold
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnalysisEvent<'a> {
    /// A detector started
    MethodAttempted {
        /// Detector
        method: ThresholdMethod,
        /// Stages available
        stages: usize,
    },
    /// A detector's result was accepted by the caller
    MethodAccepted {
        /// Detector
        method: ThresholdMethod,
        /// Grade of the accepted result
        confidence: Confidence,
    },
    /// A detector failed or its result was not accepted
    MethodRejected {
        /// Detector
        method: ThresholdMethod,
        /// Why it was rejected
        reason: &'a str,
    },
    /// The cubic fit fell below the R² gate
    PoorFit {
        /// Detector that fitted the curve
        method: ThresholdMethod,
        /// Achieved R²
        r_squared: f64,
        /// Required R²
        min_r_squared: f64,
    },
    /// Lactate decreases more than tolerated
    NonMonotonicCurve {
        /// Number of retrograde steps
        violations: usize,
        /// Largest single drop (mmol/L)
        largest_dip: f64,
    },
    /// Modified D-max found no rise above baseline
    NoRiseDetected {
        /// Baseline level (mmol/L)
        baseline_level: f64,
        /// Stage used as degraded anchor
        anchor_index: usize,
    },
    /// The athlete profile was classified
    ProfileClassified {
        /// Classification result
        profile: &'a AthleteProfile,
    },
    /// A fixed-lactate crossing was chosen for interpolation
    CrossingSelected {
        /// Target concentration (mmol/L)
        target: f64,
        /// Lower stage of the bracketing pair
        stage_index: usize,
        /// Whether a later crossing was preferred over the first
        second_crossing: bool,
    },
    /// Every method of a resolver was exhausted
    ThresholdUndetermined {
        /// Which threshold ("aerobic", "anaerobic", "lt2")
        threshold: &'static str,
    },
}

/// Receives analysis events
pub trait ThresholdObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &AnalysisEvent<'_>);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ThresholdObserver for TracingObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        match event {
            AnalysisEvent::MethodAttempted { method, stages } => {
                debug!(method = %method, stages, "Attempting threshold method");
            }
            AnalysisEvent::MethodAccepted { method, confidence } => {
                info!(method = %method, confidence = ?confidence, "Threshold method accepted");
            }
            AnalysisEvent::MethodRejected { method, reason } => {
                debug!(method = %method, reason, "Threshold method rejected");
            }
            AnalysisEvent::PoorFit {
                method,
                r_squared,
                min_r_squared,
            } => {
                warn!(method = %method, r_squared, min_r_squared, "Poor cubic fit, using fallback");
            }
            AnalysisEvent::NonMonotonicCurve {
                violations,
                largest_dip,
            } => {
                warn!(violations, largest_dip, "Lactate curve is not monotonic, results may be unreliable");
            }
            AnalysisEvent::NoRiseDetected {
                baseline_level,
                anchor_index,
            } => {
                warn!(baseline_level, anchor_index, "Unusual lactate curve: no rise above baseline");
            }
            AnalysisEvent::ProfileClassified { profile } => {
                debug!(
                    profile = ?profile.profile_type,
                    baseline_avg = profile.baseline_avg,
                    baseline_slope = profile.baseline_slope,
                    lactate_range = profile.lactate_range,
                    "Athlete profile classified"
                );
            }
            AnalysisEvent::CrossingSelected {
                target,
                stage_index,
                second_crossing,
            } => {
                debug!(target, stage_index, second_crossing, "Fixed lactate crossing selected");
            }
            AnalysisEvent::ThresholdUndetermined { threshold } => {
                warn!(threshold, "Threshold could not be determined");
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ThresholdObserver for NoopObserver {
    fn on_event(&self, _event: &AnalysisEvent<'_>) {}
}
