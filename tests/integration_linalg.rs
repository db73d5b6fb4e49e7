//! Integration tests for the linear-algebra utilities.
//!
//! Purpose
//! -------
//! - Exercise the re-exported `linalg` surface the way a caller would:
//!   plain `ndarray` inputs in, labels, factors and fits out.
//!
//! Coverage
//! --------
//! - `linalg::rank`: `lin_sol` / `linear_solutions` on the three
//!   solvability classes, and `matrix_rank`.
//! - `linalg::eigen`: `diagonalize` on a non-symmetric matrix, checked
//!   through `A P = P D`, plus complex and defective inputs.
//! - `linalg::independence`: verdicts for independent and dependent sets.
//! - `linalg::least_squares`: `fit_line` and `polyfit`.
//!
//! Exclusions
//! ----------
//! - Input-validation error variants beyond one representative case; the
//!   unit tests cover them individually.
use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use rust_numerics::linalg::{
    LinalgError, SolutionKind, diagonalize, fit_line, lin_sol, linear_independence,
    linear_solutions, matrix_rank, polyfit,
};

#[test]
// Purpose
// -------
// Classify the three kinds of linear system from their augmented
// matrices.
//
// Given
// -----
// - x + y = 3, x − y = 1 (unique).
// - x + y = 1, 2x + 2y = 3 (inconsistent).
// - x + y = 1, 2x + 2y = 2 (one equation repeated).
//
// Expect
// ------
// - "unique solution", "no solution" and "infinite solutions";
//   `linear_solutions` agrees with `lin_sol`.
fn classifies_linear_systems() {
    // Arrange
    let unique = array![[1.0, 1.0, 3.0], [1.0, -1.0, 1.0]];
    let inconsistent = array![[1.0, 1.0, 1.0], [2.0, 2.0, 3.0]];
    let repeated = array![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];

    // Act
    let kinds = [&unique, &inconsistent, &repeated].map(|m| lin_sol(m).expect("classify"));

    // Assert
    assert_eq!(kinds[0], SolutionKind::UniqueSolution);
    assert_eq!(kinds[1], SolutionKind::NoSolution);
    assert_eq!(kinds[2], SolutionKind::InfiniteSolutions);
    assert_eq!(kinds[0].label(), "unique solution");
    assert_eq!(kinds[1].label(), "no solution");
    assert_eq!(kinds[2].label(), "infinite solutions");
    assert_eq!(linear_solutions(&inconsistent).expect("classify"), kinds[1]);
}

#[test]
// Purpose
// -------
// Check a three-unknown system with fewer equations than unknowns.
//
// Given
// -----
// - Two independent equations in three unknowns.
//
// Expect
// ------
// - Coefficient rank 2 and "infinite solutions".
fn underdetermined_system_has_infinitely_many_solutions() {
    let augmented = array![[1.0, 0.0, 2.0, 4.0], [0.0, 1.0, -1.0, 2.0]];

    let kind = lin_sol(&augmented).expect("classify");
    let rank = matrix_rank(&augmented.slice(ndarray::s![.., ..3]).to_owned()).expect("rank");

    assert_eq!(rank, 2);
    assert_eq!(kind, SolutionKind::InfiniteSolutions);
}

#[test]
// Purpose
// -------
// Verify diagonalization of a non-symmetric matrix.
//
// Given
// -----
// - A = [[1, 2], [0, 3]] with eigenvalues 1 and 3.
//
// Expect
// ------
// - D = diag(1, 3) and A P = P D to 1e-10.
fn diagonalizes_upper_triangular_matrix() {
    let a = array![[1.0, 2.0], [0.0, 3.0]];

    let diag = diagonalize(&a).expect("diagonalize");
    let (d, p) = diag.real_factors().expect("real spectrum");
    let lhs: Array2<f64> = a.dot(&p);
    let rhs: Array2<f64> = p.dot(&d);

    assert!(diag.diagonalizable);
    assert_abs_diff_eq!(d[[0, 0]], 1.0, epsilon = 1e-10);
    assert_abs_diff_eq!(d[[1, 1]], 3.0, epsilon = 1e-10);
    assert_abs_diff_eq!(d[[0, 1]], 0.0);
    for (l, r) in lhs.iter().zip(rhs.iter()) {
        assert_abs_diff_eq!(*l, *r, epsilon = 1e-10);
    }
}

#[test]
// Purpose
// -------
// Check that matrices without a real eigenbasis are still decomposed.
//
// Given
// -----
// - A 90° rotation [[0, -1], [1, 0]] (eigenvalues ±i).
// - A shear [[1, 1], [0, 1]] (λ = 1 twice, one eigenvector).
//
// Expect
// ------
// - Rotation: complex eigenvalues −i, +i and no real factors.
// - Shear: eigenvalues [1, 1], real factors available, flagged as not
//   diagonalizable.
fn complex_and_defective_inputs_are_decomposed() {
    let rotation = array![[0.0, -1.0], [1.0, 0.0]];
    let shear = array![[1.0, 1.0], [0.0, 1.0]];

    let rot = diagonalize(&rotation).expect("rotation");
    let sh = diagonalize(&shear).expect("shear");

    assert_abs_diff_eq!(rot.eigenvalues[0].im, -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rot.eigenvalues[1].im, 1.0, epsilon = 1e-12);
    assert!(rot.real_factors().is_none());
    assert!(rot.diagonalizable);
    assert_abs_diff_eq!(sh.eigenvalues[0].re, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(sh.eigenvalues[1].re, 1.0, epsilon = 1e-12);
    assert!(sh.real_factors().is_some());
    assert!(!sh.diagonalizable);
}

#[test]
// Purpose
// -------
// Ensure non-square input is rejected by `diagonalize`.
//
// Given
// -----
// - A 2x3 matrix.
//
// Expect
// ------
// - LinalgError::NotSquare { rows: 2, cols: 3 }.
fn diagonalize_rejects_rectangular_input() {
    let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

    let result = diagonalize(&a);

    assert_eq!(result, Err(LinalgError::NotSquare { rows: 2, cols: 3 }));
}

#[test]
// Purpose
// -------
// Compare the independence verdict for the standard basis and a set with
// a repeated direction.
//
// Given
// -----
// - Columns of the 3x3 identity.
// - Columns (1, 1, 0), (2, 2, 0).
//
// Expect
// ------
// - Independent with rank 3; dependent with rank 1.
fn independence_verdicts() {
    let basis: Array2<f64> = Array2::eye(3);
    let parallel = array![[1.0, 2.0], [1.0, 2.0], [0.0, 0.0]];

    let basis_report = linear_independence(&basis).expect("report");
    let parallel_report = linear_independence(&parallel).expect("report");

    assert!(basis_report.independent);
    assert_eq!(basis_report.rank, 3);
    assert!(!parallel_report.independent);
    assert_eq!(parallel_report.rank, 1);
}

#[test]
// Purpose
// -------
// Fit a line and a cubic through noise-free data.
//
// Given
// -----
// - y = −3 + 0.5x at x = 1..6.
// - y = x³ − 2x at x = −3..3.
//
// Expect
// ------
// - Line coefficients recovered; cubic coefficients [0, −2, 0, 1].
fn fits_line_and_polynomial() {
    let x = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let y = x.mapv(|v| -3.0 + 0.5 * v);
    let xc = array![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
    let yc = xc.mapv(|v: f64| v.powi(3) - 2.0 * v);

    let line = fit_line(&x, &y).expect("line");
    let cubic = polyfit(&xc, &yc, 3).expect("cubic");

    assert_abs_diff_eq!(line.intercept, -3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(line.slope, 0.5, epsilon = 1e-9);
    let expected = [0.0, -2.0, 0.0, 1.0];
    for (c, e) in cubic.iter().zip(expected) {
        assert_abs_diff_eq!(*c, e, epsilon = 1e-8);
    }
}
