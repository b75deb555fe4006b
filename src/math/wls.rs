//! Weighted least-squares line fit.
//!
//! Everything in this project reduces to small regression problems of the form:
//!
//! ```text
//! minimize Σ w_i (y_i - a·x_i - b)^2
//! ```
//!
//! Implementation choices:
//! - We scale rows by `sqrt(w_i)` and solve an ordinary least squares problem.
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (always: n rows, 2 columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - The parameter dimension is 2, so SVD cost is negligible next to I/O.
//!
//! This module does not decide the weighting convention; callers pass
//! explicit weights (uniform or uncertainty-derived).

use nalgebra::{DMatrix, DVector};

use crate::domain::FitLine;
use crate::error::AppError;

/// Fit `y = slope·x + intercept` minimizing weighted squared residuals.
///
/// Requires at least two distinct `x` values and strictly positive, finite
/// weights.
pub fn fit_weighted_line(x: &[f64], y: &[f64], w: &[f64]) -> Result<FitLine, AppError> {
    let n = x.len();
    if y.len() != n || w.len() != n {
        return Err(AppError::input(format!(
            "mismatched regression array lengths: x={n}, y={}, w={}",
            y.len(),
            w.len()
        )));
    }
    if count_distinct(x) < 2 {
        return Err(AppError::insufficient_data(
            "a line fit needs at least 2 distinct x values",
        ));
    }
    for (i, &wi) in w.iter().enumerate() {
        if !wi.is_finite() || wi <= 0.0 {
            return Err(AppError::domain(format!(
                "regression weight must be finite and > 0, got {wi} at index {i}"
            )));
        }
    }

    // Row-scale by sqrt(w): argmin Σ w r² == argmin Σ (sqrt(w) r)².
    let mut design = DMatrix::zeros(n, 2);
    let mut rhs = DVector::zeros(n);
    for i in 0..n {
        let s = w[i].sqrt();
        design[(i, 0)] = s;
        design[(i, 1)] = s * x[i];
        rhs[i] = s * y[i];
    }

    let svd = design.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails; the
    // 1/T design column can be orders of magnitude smaller than the
    // intercept column.
    for &tol in &[1e-14, 1e-12, 1e-10] {
        if let Ok(beta) = svd.solve(&rhs, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Ok(FitLine {
                    slope: beta[1],
                    intercept: beta[0],
                });
            }
        }
    }

    Err(AppError::ill_conditioned(
        "weighted least-squares system is singular or near-singular",
    ))
}

fn count_distinct(x: &[f64]) -> usize {
    let mut sorted: Vec<f64> = x.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line_with_uniform_weights() {
        // y = 2 + 3x on x = [0, 1, 2]
        let x = [0.0, 1.0, 2.0];
        let y = [2.0, 5.0, 8.0];
        let w = [1.0, 1.0, 1.0];

        let line = fit_weighted_line(&x, &y, &w).unwrap();
        assert!((line.intercept - 2.0).abs() < 1e-10);
        assert!((line.slope - 3.0).abs() < 1e-10);
    }

    #[test]
    fn weights_pull_the_line_toward_heavy_points() {
        // Three collinear points plus one outlier with a tiny weight; the fit
        // should stay on the line the heavy points define.
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 100.0];
        let w = [1.0, 1.0, 1.0, 1e-12];

        let line = fit_weighted_line(&x, &y, &w).unwrap();
        assert!((line.intercept - 1.0).abs() < 1e-6);
        assert!((line.slope - 1.0).abs() < 1e-6);
    }

    #[test]
    fn matches_closed_form_weighted_solution() {
        let x = [0.5, 1.0, 1.5, 2.0, 2.5];
        let y = [1.1, 1.9, 3.2, 3.8, 5.1];
        let w = [2.0, 1.0, 0.5, 1.5, 3.0];

        let line = fit_weighted_line(&x, &y, &w).unwrap();

        // Closed-form weighted least squares via centered sums.
        let sw: f64 = w.iter().sum();
        let xb: f64 = x.iter().zip(&w).map(|(xi, wi)| wi * xi).sum::<f64>() / sw;
        let yb: f64 = y.iter().zip(&w).map(|(yi, wi)| wi * yi).sum::<f64>() / sw;
        let sxy: f64 = (0..x.len()).map(|i| w[i] * (x[i] - xb) * (y[i] - yb)).sum();
        let sxx: f64 = (0..x.len()).map(|i| w[i] * (x[i] - xb) * (x[i] - xb)).sum();
        let slope = sxy / sxx;
        let intercept = yb - slope * xb;

        assert!((line.slope - slope).abs() < 1e-10);
        assert!((line.intercept - intercept).abs() < 1e-10);
    }

    #[test]
    fn two_point_fit_is_exact() {
        let x = [1.0, 2.0];
        let y = [3.0, 5.0];
        let w = [1.0, 1.0];

        let line = fit_weighted_line(&x, &y, &w).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_x_values() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0];
        let w = [1.0, 1.0, 1.0];

        let err = fit_weighted_line(&x, &y, &w).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }

    #[test]
    fn rejects_nonpositive_weights() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        let w = [1.0, 0.0, 1.0];

        let err = fit_weighted_line(&x, &y, &w).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));
    }
}
