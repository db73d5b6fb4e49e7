//! Linear-independence test via singular values.
//!
//! The vectors under test are the *columns* of the input matrix. They are
//! independent exactly when every one of the `ncols` singular directions
//! carries a singular value above the rank tolerance
//! `σ_max · max(m, n) · ε`; with more vectors than coordinates they are
//! always dependent.
use ndarray::{Array1, Array2};

use crate::linalg::{
    conversion::{check_matrix, to_dmatrix},
    errors::LinalgResult,
    rank::{rank_from_singular_values, rank_tolerance, singular_values},
};

#[derive(Debug, Clone, PartialEq)]
pub struct IndependenceReport {
    /// Descending singular values (`min(m, n)` of them).
    pub singular_values: Array1<f64>,
    /// Cut-off below which a singular value counts as zero.
    pub tolerance: f64,
    pub rank: usize,
    pub independent: bool,
}

/// Test whether the columns of `vectors` are linearly independent.
///
/// # Errors
/// - [`crate::linalg::errors::LinalgError::EmptyMatrix`] /
///   [`crate::linalg::errors::LinalgError::NonFinite`].
pub fn linear_independence(vectors: &Array2<f64>) -> LinalgResult<IndependenceReport> {
    check_matrix(vectors)?;
    let (rows, cols) = vectors.dim();
    let sv = singular_values(&to_dmatrix(vectors));
    let tolerance = rank_tolerance(sv.first().copied().unwrap_or(0.0), rows, cols);
    let rank = rank_from_singular_values(&sv, rows, cols);
    Ok(IndependenceReport {
        singular_values: Array1::from(sv),
        tolerance,
        rank,
        independent: rank == cols,
    })
}
