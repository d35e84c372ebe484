// ABOUTME: Core types and constants for lactate threshold detection
// ABOUTME: Foundation crate with error handling, the step-test data model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Lactate Core
//!
//! Foundation crate providing shared types and constants for the lactate
//! threshold engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `EngineError` and `ErrorCode`
//! - **constants**: Physiological and algorithmic defaults
//! - **models**: Step-test stages, intensity quantities, and validated tests

/// Unified error handling system with standard error codes
pub mod errors;

/// Physiological constants and algorithm defaults
pub mod constants;

/// Step-test data model (`Quantity`, `TestStage`, `StepTest`)
pub mod models;

pub use errors::{EngineError, EngineResult, ErrorCode};
pub use models::{IntensityUnit, Quantity, RawTestStage, StepTest, TestStage};
