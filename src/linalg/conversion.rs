//! Bridges between the `ndarray` API surface and `nalgebra` factorizations,
//! plus the input checks shared by every utility.
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

use crate::linalg::errors::{LinalgError, LinalgResult};

/// Copy an `ndarray` matrix into a freshly allocated `DMatrix`.
pub fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let mut out = DMatrix::<f64>::zeros(a.nrows(), a.ncols());
    fill_dmatrix(a, &mut out);
    out
}

/// Copy `src` into `dst` column by column, matching `DMatrix` storage.
///
/// Both matrices must have the same shape.
pub fn fill_dmatrix(src: &Array2<f64>, dst: &mut DMatrix<f64>) {
    for (j, column) in src.columns().into_iter().enumerate() {
        for (i, &value) in column.iter().enumerate() {
            dst[(i, j)] = value;
        }
    }
}

pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Reject empty matrices and non-finite entries.
///
/// # Errors
/// - [`LinalgError::EmptyMatrix`] when either dimension is zero.
/// - [`LinalgError::NonFinite`] for the first offending entry (row-major).
pub fn check_matrix(a: &Array2<f64>) -> LinalgResult<()> {
    if a.nrows() == 0 || a.ncols() == 0 {
        return Err(LinalgError::EmptyMatrix { rows: a.nrows(), cols: a.ncols() });
    }
    if let Some(((row, col), &value)) = a.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(LinalgError::NonFinite { row, col, value });
    }
    Ok(())
}

/// Like [`check_matrix`], and additionally require `n×n`.
pub fn check_square(a: &Array2<f64>) -> LinalgResult<()> {
    check_matrix(a)?;
    if a.nrows() != a.ncols() {
        return Err(LinalgError::NotSquare { rows: a.nrows(), cols: a.ncols() });
    }
    Ok(())
}

/// Reject non-finite entries in a vector; errors report `col = 0`.
pub fn check_vector(v: &Array1<f64>) -> LinalgResult<()> {
    if let Some((row, &value)) = v.indexed_iter().find(|(_, x)| !x.is_finite()) {
        return Err(LinalgError::NonFinite { row, col: 0, value });
    }
    Ok(())
}
