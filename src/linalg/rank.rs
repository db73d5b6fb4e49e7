//! linalg::rank — numerical rank and linear-system classification.
//!
//! Purpose
//! -------
//! Count the independent rows/columns of a matrix from its singular values
//! and use that count to classify `A x = b` from its augmented matrix
//! `[A | b]`.
//!
//! Key behaviors
//! -------------
//! - [`singular_values`] returns σ in descending order.
//! - [`matrix_rank`] counts σ strictly above `σ_max · max(m, n) · ε`.
//! - [`lin_sol`] (alias [`linear_solutions`]) compares `rank(A)`,
//!   `rank([A | b])` and the number of unknowns:
//!   - `rank(A) < rank([A | b])` → no solution,
//!   - `rank(A) == rank([A | b]) == ncols(A)` → unique solution,
//!   - otherwise → infinitely many solutions.
//!
//! Conventions
//! -----------
//! - The last column of the augmented matrix is the right-hand side.
use std::fmt;

use nalgebra::DMatrix;
use ndarray::{Array2, s};

use crate::linalg::{
    conversion::{check_matrix, to_dmatrix},
    errors::{LinalgError, LinalgResult},
};

/// Singular values of `m`, largest first.
pub fn singular_values(m: &DMatrix<f64>) -> Vec<f64> {
    let mut sv: Vec<f64> = m.singular_values().iter().copied().collect();
    sv.sort_by(|a, b| b.total_cmp(a));
    sv
}

/// Rank cut-off for an `rows × cols` matrix with largest singular value
/// `sigma_max`.
pub fn rank_tolerance(sigma_max: f64, rows: usize, cols: usize) -> f64 {
    sigma_max * rows.max(cols) as f64 * f64::EPSILON
}

/// Number of singular values strictly above [`rank_tolerance`].
pub fn rank_from_singular_values(sv: &[f64], rows: usize, cols: usize) -> usize {
    let sigma_max = sv.first().copied().unwrap_or(0.0);
    let tol = rank_tolerance(sigma_max, rows, cols);
    sv.iter().filter(|&&s| s > tol).count()
}

/// Numerical rank of `a`.
///
/// # Errors
/// - [`LinalgError::EmptyMatrix`] / [`LinalgError::NonFinite`].
pub fn matrix_rank(a: &Array2<f64>) -> LinalgResult<usize> {
    check_matrix(a)?;
    let sv = singular_values(&to_dmatrix(a));
    Ok(rank_from_singular_values(&sv, a.nrows(), a.ncols()))
}

/// Solvability class of a linear system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionKind {
    NoSolution,
    UniqueSolution,
    InfiniteSolutions,
}

impl SolutionKind {
    pub fn label(self) -> &'static str {
        match self {
            SolutionKind::NoSolution => "no solution",
            SolutionKind::UniqueSolution => "unique solution",
            SolutionKind::InfiniteSolutions => "infinite solutions",
        }
    }
}

impl fmt::Display for SolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `A x = b` given the augmented matrix `[A | b]`.
///
/// # Errors
/// - [`LinalgError::AugmentedTooNarrow`] for fewer than two columns.
/// - [`LinalgError::EmptyMatrix`] / [`LinalgError::NonFinite`].
pub fn lin_sol(augmented: &Array2<f64>) -> LinalgResult<SolutionKind> {
    check_matrix(augmented)?;
    let cols = augmented.ncols();
    if cols < 2 {
        return Err(LinalgError::AugmentedTooNarrow { cols });
    }
    let coefficients = augmented.slice(s![.., ..cols - 1]).to_owned();

    let rank = matrix_rank(&coefficients)?;
    let rank_augmented = matrix_rank(augmented)?;

    // The two ranks use different cut-offs, so rank(A) > rank([A | b]) can
    // occur; it falls through to infinitely many solutions.
    if rank < rank_augmented {
        Ok(SolutionKind::NoSolution)
    } else if rank == rank_augmented && rank_augmented == coefficients.ncols() {
        Ok(SolutionKind::UniqueSolution)
    } else {
        Ok(SolutionKind::InfiniteSolutions)
    }
}

/// Same classifier as [`lin_sol`].
pub fn linear_solutions(augmented: &Array2<f64>) -> LinalgResult<SolutionKind> {
    lin_sol(augmented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Rank of full-rank, rank-deficient, zero and wide matrices.
    // - The three classifier outcomes and their labels.
    // - Input validation for augmented matrices.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify rank on representative shapes.
    //
    // Given
    // -----
    // - I₂, a 3x3 matrix whose third row is the sum of the first two,
    //   the 2x2 zero matrix, and a 2x4 wide matrix of rank 2.
    //
    // Expect
    // ------
    // - Ranks 2, 2, 0, 2.
    fn rank_of_representative_matrices() {
        let identity = array![[1.0, 0.0], [0.0, 1.0]];
        let deficient = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [5.0, 7.0, 9.0]];
        let zero = Array2::<f64>::zeros((2, 2));
        let wide = array![[1.0, 0.0, 2.0, 0.0], [0.0, 1.0, 0.0, 3.0]];

        assert_eq!(matrix_rank(&identity), Ok(2));
        assert_eq!(matrix_rank(&deficient), Ok(2));
        assert_eq!(matrix_rank(&zero), Ok(0));
        assert_eq!(matrix_rank(&wide), Ok(2));
    }

    #[test]
    // Purpose
    // -------
    // Cover the three classifier outcomes.
    //
    // Given
    // -----
    // - x + y = 3, x − y = 1 (2x3 augmented, unique).
    // - x + y = 1, x + y = 2 (inconsistent).
    // - x + y = 1, 2x + 2y = 2 (dependent rows).
    //
    // Expect
    // ------
    // - unique, no solution, infinite solutions.
    fn classifies_all_three_cases() {
        let unique = array![[1.0, 1.0, 3.0], [1.0, -1.0, 1.0]];
        let none = array![[1.0, 1.0, 1.0], [1.0, 1.0, 2.0]];
        let infinite = array![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];

        assert_eq!(lin_sol(&unique), Ok(SolutionKind::UniqueSolution));
        assert_eq!(lin_sol(&none), Ok(SolutionKind::NoSolution));
        assert_eq!(linear_solutions(&infinite), Ok(SolutionKind::InfiniteSolutions));
        assert_eq!(SolutionKind::NoSolution.to_string(), "no solution");
    }

    #[test]
    // Purpose
    // -------
    // Ensure underdetermined systems report infinite solutions.
    //
    // Given
    // -----
    // - One equation in three unknowns: x + y + z = 1.
    //
    // Expect
    // ------
    // - infinite solutions.
    fn underdetermined_system_has_infinite_solutions() {
        let augmented = array![[1.0, 1.0, 1.0, 1.0]];

        assert_eq!(lin_sol(&augmented), Ok(SolutionKind::InfiniteSolutions));
    }

    #[test]
    // Purpose
    // -------
    // Check that a single column cannot be split into [A | b].
    //
    // Given
    // -----
    // - A 2x1 matrix.
    //
    // Expect
    // ------
    // - AugmentedTooNarrow { cols: 1 }.
    fn single_column_is_rejected() {
        let augmented = array![[1.0], [2.0]];

        assert_eq!(lin_sol(&augmented), Err(LinalgError::AugmentedTooNarrow { cols: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Pin the three-way rank comparison when tolerance scaling makes the
    // augmented rank the smaller one.
    //
    // Given
    // -----
    // - A = diag(1, 1e-14): σ_min = 1e-14 is above A's cut-off 2·2·ε·1,
    //   so rank(A) = 2.
    // - b = (1000, 0): [A | b] has σ_max ≈ 1000, cut-off ≈ 6.7e-13, so
    //   rank([A | b]) = 1.
    //
    // Expect
    // ------
    // - rank(A) > rank([A | b]) and the system is reported as having
    //   infinitely many solutions, not a unique one.
    fn larger_coefficient_rank_is_not_unique() {
        let augmented = array![[1.0, 0.0, 1000.0], [0.0, 1e-14, 0.0]];
        let coefficients = array![[1.0, 0.0], [0.0, 1e-14]];

        assert_eq!(matrix_rank(&coefficients), Ok(2));
        assert_eq!(matrix_rank(&augmented), Ok(1));
        assert_eq!(lin_sol(&augmented), Ok(SolutionKind::InfiniteSolutions));
    }
}
