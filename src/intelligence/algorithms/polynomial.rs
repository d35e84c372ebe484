// ABOUTME: Least-squares cubic fit of blood lactate against exercise intensity
// ABOUTME: Reports polynomial coefficients, per-stage predictions, and the coefficient of determination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use lactate_core::{EngineError, EngineResult, ErrorCode};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Points needed to determine a cubic
pub const CUBIC_MIN_POINTS: usize = 4;

/// Singular values below this are treated as zero by the solver
const SVD_EPSILON: f64 = 1e-12;

/// Cubic `y = a·x³ + b·x² + c·x + d` fitted to a lactate curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialCoefficients {
    /// Cubic coefficient
    pub a: f64,
    /// Quadratic coefficient
    pub b: f64,
    /// Linear coefficient
    pub c: f64,
    /// Constant term
    pub d: f64,
    /// Coefficient of determination (0-1)
    pub r_squared: f64,
    /// Fitted lactate at each input intensity
    pub predictions: Vec<f64>,
}

impl PolynomialCoefficients {
    /// Evaluate the cubic at `x` (Horner form)
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a.mul_add(x, self.b).mul_add(x, self.c).mul_add(x, self.d)
    }
}

/// Ordinary least-squares cubic fitter
pub struct CubicFitter;

impl CubicFitter {
    /// Fit a cubic to `(intensity, lactate)` pairs
    ///
    /// The design matrix `[t³, t², t, 1]` is built on intensities centred and
    /// scaled to `[-1, 1]` and solved by SVD; coefficients are mapped back to the
    /// raw intensity scale. A poor fit is not an error: callers gate on
    /// `r_squared`.
    ///
    /// # Errors
    ///
    /// - `ArrayLengthMismatch` if the slices differ in length
    /// - `InsufficientData` with fewer than 4 points
    /// - `InvalidInput` for non-finite values or a failed solve
    pub fn fit(intensity: &[f64], lactate: &[f64]) -> EngineResult<PolynomialCoefficients> {
        if intensity.len() != lactate.len() {
            return Err(EngineError::new(
                ErrorCode::ArrayLengthMismatch,
                format!(
                    "cubic fit needs equal lengths, got {} intensities and {} lactate values",
                    intensity.len(),
                    lactate.len()
                ),
            ));
        }
        let n = intensity.len();
        if n < CUBIC_MIN_POINTS {
            return Err(EngineError::insufficient_data(
                "Cubic fit",
                CUBIC_MIN_POINTS,
                n,
            ));
        }
        if intensity.iter().chain(lactate).any(|v| !v.is_finite()) {
            return Err(EngineError::invalid_input(
                "Cubic fit requires finite intensity and lactate values",
            ));
        }

        let mean = intensity.iter().sum::<f64>() / n as f64;
        let spread = intensity
            .iter()
            .map(|x| (x - mean).abs())
            .fold(0.0_f64, f64::max);
        let scale = if spread > f64::EPSILON { spread } else { 1.0 };

        let design = DMatrix::from_fn(n, 4, |row, col| {
            let t = (intensity[row] - mean) / scale;
            t.powi(3 - col as i32)
        });
        let observed = DVector::from_column_slice(lactate);

        let solution = design
            .clone()
            .svd(true, true)
            .solve(&observed, SVD_EPSILON)
            .map_err(|e| EngineError::invalid_input(format!("Cubic fit failed: {e}")))?;

        let fitted = &design * &solution;
        let predictions: Vec<f64> = fitted.iter().copied().collect();
        let r_squared = Self::r_squared(lactate, &predictions);

        // Expand p((x - mean) / scale) into powers of x
        let big_a = solution[0] / scale.powi(3);
        let big_b = solution[1] / scale.powi(2);
        let big_c = solution[2] / scale;
        let big_d = solution[3];
        let m = mean;

        Ok(PolynomialCoefficients {
            a: big_a,
            b: (-3.0 * m).mul_add(big_a, big_b),
            c: (3.0 * m * m).mul_add(big_a, (-2.0 * m).mul_add(big_b, big_c)),
            d: (-m * m * m).mul_add(big_a, (m * m).mul_add(big_b, (-m).mul_add(big_c, big_d))),
            r_squared,
            predictions,
        })
    }

    /// `1 − SS_res / SS_tot`, clamped to `[0, 1]`; zero when the data has no variance
    #[must_use]
    pub fn r_squared(observed: &[f64], predicted: &[f64]) -> f64 {
        if observed.is_empty() {
            return 0.0;
        }
        let mean = observed.iter().sum::<f64>() / observed.len() as f64;
        let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();
        if ss_tot <= f64::EPSILON {
            return 0.0;
        }
        let ss_res: f64 = observed
            .iter()
            .zip(predicted)
            .map(|(y, p)| (y - p).powi(2))
            .sum();
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    }
}
