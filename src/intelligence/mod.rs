// ABOUTME: Lactate threshold intelligence: detectors, resolvers, observer hook, and result types
// ABOUTME: Re-exports the engine surface used by the CLI and library consumers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Raw stages flow one way: curve fit, geometric search, confidence grading,
//! then a resolver composes the final [`ThresholdResult`]. Nothing here keeps
//! state between calls.

/// Fitting, geometric search, profiling, and fallback hierarchies
pub mod algorithms;
/// Engine facade and report types
pub mod engine;
/// Injectable observability hook
pub mod observer;
/// Result record, method tags, confidence grades
pub mod threshold;

pub use algorithms::{
    AthleteProfile, AthleteProfileClassifier, ConfidenceScorer, CubicFitter, DmaxFinder,
    DmaxPoint, ModifiedDmaxAnchor, PolynomialCoefficients, ProfileType, StageInterpolator,
};
pub use engine::{
    LactateThresholdEngine, Lt1Detector, ThresholdReport, TrainingZone, TrainingZones,
};
pub use observer::{AnalysisEvent, NoopObserver, ThresholdObserver, TracingObserver};
pub use threshold::{Confidence, ThresholdMethod, ThresholdResult};
