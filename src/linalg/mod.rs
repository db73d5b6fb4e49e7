//! linalg — small, independent linear-algebra utilities.
//!
//! Purpose
//! -------
//! Provide pure functions over `ndarray` matrices for four textbook tasks:
//! classifying a linear system by rank, diagonalizing a square matrix,
//! testing vectors for linear independence, and least-squares fitting.
//! Factorizations are delegated to `nalgebra`.
//!
//! Key behaviors
//! -------------
//! - [`rank`]: SVD-based numerical rank and the `lin_sol` /
//!   `linear_solutions` classifier (`"no solution"`, `"unique solution"`,
//!   `"infinite solutions"`).
//! - [`eigen`]: `diagonalize` returning `D` and `P` with `A P = P D`.
//! - [`independence`]: singular values, tolerance and verdict for a set of
//!   column vectors.
//! - [`least_squares`]: normal-equation solves, `fit_line` and `polyfit`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs must be non-empty and finite; violations are reported as
//!   [`LinalgError`] values before any factorization runs.
//! - Rank decisions share one tolerance rule, `σ_max · max(m, n) · ε`.
//!
//! Conventions
//! -----------
//! - No function keeps state between calls or mutates its input.
//! - Conversions between `ndarray` and `nalgebra` live in [`conversion`].
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests on hand-checked matrices;
//!   `tests/integration_linalg.rs` exercises the re-exported surface.

pub mod conversion;
pub mod eigen;
pub mod errors;
pub mod independence;
pub mod least_squares;
pub mod rank;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::eigen::{Diagonalization, diagonalize};
pub use self::errors::{LinalgError, LinalgResult};
pub use self::independence::{IndependenceReport, linear_independence};
pub use self::least_squares::{LineFit, fit_line, least_squares, polyfit};
pub use self::rank::{SolutionKind, lin_sol, linear_solutions, matrix_rank};

pub mod prelude {
    pub use super::eigen::{Diagonalization, diagonalize};
    pub use super::errors::{LinalgError, LinalgResult};
    pub use super::independence::{IndependenceReport, linear_independence};
    pub use super::least_squares::{LineFit, fit_line, least_squares, polyfit};
    pub use super::rank::{SolutionKind, lin_sol, linear_solutions, matrix_rank};
}
