//! Least-squares cubic fit used by the toe heuristic.

use nalgebra::{DMatrix, DVector};

/// Coefficients of `c0 + c1*x + c2*x^2 + c3*x^3` fitted to the points by
/// least squares. Returns `None` when fewer than four points are supplied
/// or the system is numerically degenerate.
pub fn fit_cubic(xs: &[f64], ys: &[f64]) -> Option<[f64; 4]> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n < 4 {
        return None;
    }
    let design = DMatrix::from_fn(n, 4, |r, c| xs[r].powi(c as i32));
    let rhs = DVector::from_column_slice(ys);
    let solution = design.svd(true, true).solve(&rhs, 1e-12).ok()?;
    let coeffs = [solution[0], solution[1], solution[2], solution[3]];
    if coeffs.iter().all(|c| c.is_finite()) {
        Some(coeffs)
    } else {
        None
    }
}

/// Evaluates the fitted cubic at `x` (Horner form).
pub fn eval_cubic(coeffs: &[f64; 4], x: f64) -> f64 {
    coeffs[0] + x * (coeffs[1] + x * (coeffs[2] + x * coeffs[3]))
}
