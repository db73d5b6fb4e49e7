//! linalg::least_squares — closed-form linear least squares.
//!
//! Purpose
//! -------
//! Solve `min ‖A x − y‖²` through the normal equations `AᵀA x = Aᵀy`, and
//! build the design matrices for straight-line and polynomial fits.
//!
//! Key behaviors
//! -------------
//! - [`least_squares`] factors `AᵀA` with a Cholesky decomposition. A
//!   rank-deficient design (numerical rank below its column count) or a
//!   failed factorization is reported as
//!   [`LinalgError::SingularNormalMatrix`].
//! - [`fit_line`] fits `y ≈ intercept + slope · x`.
//! - [`polyfit`] fits `y ≈ c₀ + c₁x + … + c_d x^d` and returns the
//!   coefficients in ascending powers.
//!
//! Invariants & assumptions
//! ------------------------
//! - `design.nrows() == y.len()` and there are at least as many
//!   observations as unknowns.
//! - All inputs are finite.
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::linalg::{
    conversion::{check_matrix, check_vector, to_dmatrix},
    errors::{LinalgError, LinalgResult},
    rank::matrix_rank,
};

/// Coefficients of `y ≈ intercept + slope · x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Least-squares solution of `design · x ≈ y`.
///
/// # Errors
/// - [`LinalgError::LengthMismatch`] if `y.len() != design.nrows()`.
/// - [`LinalgError::InsufficientData`] if `design.nrows() < design.ncols()`.
/// - [`LinalgError::SingularNormalMatrix`] if `AᵀA` cannot be factored.
/// - Shape/finiteness errors from the input checks.
pub fn least_squares(design: &Array2<f64>, y: &Array1<f64>) -> LinalgResult<Array1<f64>> {
    check_matrix(design)?;
    check_vector(y)?;
    let (rows, cols) = design.dim();
    if y.len() != rows {
        return Err(LinalgError::LengthMismatch { expected: rows, found: y.len() });
    }
    if rows < cols {
        return Err(LinalgError::InsufficientData { observations: rows, unknowns: cols });
    }
    if matrix_rank(design)? < cols {
        return Err(LinalgError::SingularNormalMatrix);
    }

    let a = to_dmatrix(design);
    let rhs = DVector::from_iterator(rows, y.iter().copied());
    let normal: DMatrix<f64> = a.transpose() * &a;
    let projected = a.transpose() * rhs;

    let cholesky = normal.cholesky().ok_or(LinalgError::SingularNormalMatrix)?;
    let solution = cholesky.solve(&projected);
    Ok(Array1::from_iter(solution.iter().copied()))
}

/// Straight-line fit through `(x[i], y[i])`.
///
/// # Errors
/// - [`LinalgError::LengthMismatch`], [`LinalgError::InsufficientData`]
///   (fewer than two points), [`LinalgError::SingularNormalMatrix`] when all
///   `x` coincide.
pub fn fit_line(x: &Array1<f64>, y: &Array1<f64>) -> LinalgResult<LineFit> {
    let coefficients = polyfit(x, y, 1)?;
    Ok(LineFit { intercept: coefficients[0], slope: coefficients[1] })
}

/// Polynomial fit of the given `degree`; coefficients in ascending powers.
///
/// # Errors
/// - As [`least_squares`], with `degree + 1` unknowns.
pub fn polyfit(x: &Array1<f64>, y: &Array1<f64>, degree: usize) -> LinalgResult<Array1<f64>> {
    check_vector(x)?;
    if x.len() != y.len() {
        return Err(LinalgError::LengthMismatch { expected: x.len(), found: y.len() });
    }
    if x.len() < degree + 1 {
        return Err(LinalgError::InsufficientData { observations: x.len(), unknowns: degree + 1 });
    }
    least_squares(&vandermonde(x, degree), y)
}

/// Design matrix with columns `1, x, x², …, x^degree`.
pub fn vandermonde(x: &Array1<f64>, degree: usize) -> Array2<f64> {
    Array2::from_shape_fn((x.len(), degree + 1), |(i, j)| x[i].powi(j as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact recovery on noise-free data (line and quadratic).
    // - A hand-computed overdetermined line fit.
    // - Length, data-count and singularity errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify a line through exact data is recovered.
    //
    // Given
    // -----
    // - y = 1 + 2x at x = 0..4.
    //
    // Expect
    // ------
    // - intercept 1, slope 2; predict(10) = 21.
    fn recovers_exact_line() {
        // Arrange
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = x.mapv(|v| 1.0 + 2.0 * v);

        // Act
        let fit = fit_line(&x, &y).expect("fit");

        // Assert
        assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.predict(10.0), 21.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Check an overdetermined fit against the textbook formulas.
    //
    // Given
    // -----
    // - (0, 1), (1, 3), (2, 4), (3, 4).
    // - slope = Sxy / Sxx = 5 / 5 = 1; intercept = ȳ − slope·x̄ = 3 − 1.5.
    //
    // Expect
    // ------
    // - slope 1, intercept 1.5.
    fn overdetermined_line_matches_closed_form() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![1.0, 3.0, 4.0, 4.0];

        let fit = fit_line(&x, &y).expect("fit");

        assert_abs_diff_eq!(fit.slope, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.intercept, 1.5, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Verify quadratic recovery through the Vandermonde design.
    //
    // Given
    // -----
    // - y = 2 − x + 0.5x² at x = −2..3.
    //
    // Expect
    // ------
    // - coefficients [2, −1, 0.5].
    fn polyfit_recovers_quadratic() {
        let x = array![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
        let y = x.mapv(|v| 2.0 - v + 0.5 * v * v);

        let c = polyfit(&x, &y, 2).expect("fit");

        assert_abs_diff_eq!(c[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c[1], -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c[2], 0.5, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Cover the error paths.
    //
    // Given
    // -----
    // - Mismatched lengths; a single point; all x equal.
    //
    // Expect
    // ------
    // - LengthMismatch; InsufficientData; SingularNormalMatrix.
    fn reports_invalid_inputs() {
        let mismatch = fit_line(&array![1.0, 2.0], &array![1.0]);
        let single = fit_line(&array![1.0], &array![1.0]);
        let vertical = fit_line(&array![2.0, 2.0, 2.0], &array![1.0, 2.0, 3.0]);

        assert_eq!(mismatch, Err(LinalgError::LengthMismatch { expected: 2, found: 1 }));
        assert_eq!(single, Err(LinalgError::InsufficientData { observations: 1, unknowns: 2 }));
        assert_eq!(vertical, Err(LinalgError::SingularNormalMatrix));
    }
}
