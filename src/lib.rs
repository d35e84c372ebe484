// ABOUTME: Main library entry point for the lactate threshold detection engine
// ABOUTME: Computes aerobic (LT1) and anaerobic (LT2) thresholds from incremental step tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Lactate Threshold
//!
//! A pure computation library: an ordered, unit-consistent step test goes in,
//! threshold records come out. Persistence, authorization and presentation
//! belong to the caller.
//!
//! ## Features
//!
//! - **Curve fitting**: least-squares cubic with R² gating
//! - **D-max family**: standard D-max and Bishop Modified D-max
//! - **Athlete profiling**: standard versus elite-flat lactate curves
//! - **Fallback hierarchies**: exponential rise, baseline offsets, fixed 2.0 / 4.0 mmol/L
//! - **Batch analysis**: independent tests analyzed in parallel
//!
//! ## Architecture
//!
//! - **`lactate_core`**: errors, data model, constants
//! - **config**: every tunable cutoff, overridable from `LACTATE_*` variables
//! - **intelligence**: detectors, resolvers, observer hook, engine facade
//! - **input**: JSON ingestion for the CLI
//! - **output**: JSON documents the CLI prints
//! - **logging**: `tracing-subscriber` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lactate_threshold::intelligence::LactateThresholdEngine;
//! use lactate_threshold::{IntensityUnit, StepTest};
//!
//! let test = StepTest::from_columns(
//!     &[8.0, 10.0, 12.0, 14.0, 16.0, 18.0],
//!     IntensityUnit::KmPerHour,
//!     &[1.0, 1.2, 1.8, 2.9, 4.8, 7.5],
//!     &[120, 132, 145, 158, 170, 182],
//! )?;
//! let report = LactateThresholdEngine::default().analyze(&test)?;
//! if let Some(lt2) = report.anaerobic {
//!     println!("LT2 at {:.1} {}", lt2.intensity, lt2.unit);
//! }
//! # Ok::<(), lactate_threshold::EngineError>(())
//! ```

/// Engine configuration and environment overrides
pub mod config;

/// Threshold detection algorithms and the engine facade
pub mod intelligence;

/// JSON ingestion of step tests and configuration files
pub mod input;

/// Logging configuration and structured logging setup
pub mod logging;

/// JSON documents printed by the command-line front end
pub mod output;

pub use lactate_core::{
    constants, EngineError, EngineResult, ErrorCode, IntensityUnit, Quantity, RawTestStage,
    StepTest, TestStage,
};
