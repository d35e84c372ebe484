// ABOUTME: Benchmark fixtures generating realistic incremental step tests
// ABOUTME: Deterministic lactate curves so measurements are reproducible across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for step tests.

use lactate_threshold::{IntensityUnit, StepTest};

/// Predefined batch sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum StepTestBatchSize {
    /// One team (10 tests)
    Small,
    /// One lab season (200 tests)
    Large,
}

impl StepTestBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Large => 200,
        }
    }
}

/// Exponential lactate curve on a power ramp
///
/// `index` varies the baseline and steepness so a batch mixes standard and
/// flat elite shapes.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::expect_used
)]
#[must_use]
pub fn generate_step_test(index: usize, stages: usize) -> StepTest {
    let baseline = 0.7 + ((index * 7) % 10) as f64 / 10.0;
    let steepness = 0.25 + ((index * 3) % 5) as f64 / 20.0;

    let intensity: Vec<f64> = (0..stages).map(|i| 100.0 + 25.0 * i as f64).collect();
    let lactate: Vec<f64> = (0..stages)
        .map(|i| 0.15f64.mul_add((steepness * i as f64).exp(), baseline))
        .collect();
    let heart_rate: Vec<u32> = (0..stages).map(|i| 105 + 9 * i as u32).collect();

    StepTest::from_columns(&intensity, IntensityUnit::Watt, &lactate, &heart_rate)
        .expect("generated stages are ordered and finite")
}

/// Batch of generated step tests
#[must_use]
pub fn generate_step_tests(size: StepTestBatchSize) -> Vec<StepTest> {
    (0..size.count())
        .map(|index| generate_step_test(index, 8))
        .collect()
}
