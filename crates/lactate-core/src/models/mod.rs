// ABOUTME: Step-test data model shared by every threshold algorithm
// ABOUTME: Re-exports stage, quantity, unit, and validated step-test types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Stage, intensity quantity, and unit types
pub mod stage;


pub use stage::{IntensityUnit, Quantity, RawTestStage, TestStage};
pub use step_test::StepTest;
