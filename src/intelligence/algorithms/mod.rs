// ABOUTME: Numerical building blocks of lactate threshold detection
// ABOUTME: Cubic fitting, geometric D-max search, profiling, confidence grading, and fallback hierarchies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm Module
//!
//! Leaf components are stateless unit structs with associated functions
//! (`CubicFitter`, `DmaxFinder`, `ConfidenceScorer`, `AthleteProfileClassifier`,
//! `StageInterpolator`). Components that need configuration and the observer
//! hook are methods on [`crate::intelligence::LactateThresholdEngine`], split by
//! concern across `dmax`, `lt2_ensemble`, and `resolvers`.
//!
//! # Example
//!
//! ```rust,no_run
//! use lactate_threshold::intelligence::algorithms::CubicFitter;
//!
//! let fit = CubicFitter::fit(&[8.0, 10.0, 12.0, 14.0], &[1.0, 1.4, 2.3, 4.1])?;
//! println!("R² = {:.3}", fit.r_squared);
//! # Ok::<(), lactate_threshold::EngineError>(())
//! ```

/// Confidence grading from fit quality and relative D-max distance
pub mod confidence;
/// Standard and Modified D-max detection with poor-fit fallback
pub mod dmax;
/// Baseline chord and maximum perpendicular distance search
pub mod geometric;
/// Stage crossings, linear interpolation, and nearest-stage lookup
pub mod interpolation;
/// Three-method LT2 hierarchy for flat and irregular curves
pub mod lt2_ensemble;
/// Least-squares cubic fit of lactate against intensity
pub mod polynomial;
/// Baseline estimation and athlete profile classification
pub mod profile;
/// Profile-aware aerobic and anaerobic threshold resolvers
pub mod resolvers;

pub use confidence::ConfidenceScorer;
pub use dmax::{ModifiedDmaxAnchor, MonotonicityReport};
pub use geometric::{BaselineLine, DmaxFinder, DmaxPoint};
pub use interpolation::{InterpolatedPoint, StageInterpolator};
pub use polynomial::{CubicFitter, PolynomialCoefficients};
pub use profile::{AthleteProfile, AthleteProfileClassifier, BaselineEstimate, ProfileType};

/// Slack for lactate comparisons against sums of configured deltas
pub const FLOAT_TOLERANCE: f64 = 1e-9;
