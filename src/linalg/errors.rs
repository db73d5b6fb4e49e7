//! Error handling for the linear-algebra utilities.
//!
//! `LinalgError` groups input-shape problems (empty, non-square, mismatched
//! lengths), non-finite data, and singular normal equations in least
//! squares.
//! `LinalgResult<T>` is the shared return type.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    // ---- Shape ----
    /// Matrix has zero rows or zero columns.
    EmptyMatrix { rows: usize, cols: usize },

    /// Operation requires a square matrix.
    NotSquare { rows: usize, cols: usize },

    /// Augmented matrix needs at least one coefficient column and the
    /// right-hand side.
    AugmentedTooNarrow { cols: usize },

    /// Paired inputs have different lengths.
    LengthMismatch { expected: usize, found: usize },

    /// Fewer observations than unknowns.
    InsufficientData { observations: usize, unknowns: usize },

    // ---- Data ----
    /// Entries must be finite.
    NonFinite { row: usize, col: usize, value: f64 },

    // ---- Numerical ----
    /// `AᵀA` is not positive definite.
    SingularNormalMatrix,
}

pub type LinalgResult<T> = Result<T, LinalgError>;

impl std::error::Error for LinalgError {}

impl std::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape ----
            LinalgError::EmptyMatrix { rows, cols } => {
                write!(f, "Linalg Error: Matrix is empty ({rows}x{cols})")
            }
            LinalgError::NotSquare { rows, cols } => {
                write!(f, "Linalg Error: Matrix must be square, got {rows}x{cols}")
            }
            LinalgError::AugmentedTooNarrow { cols } => write!(
                f,
                "Linalg Error: Augmented matrix needs at least 2 columns, got {cols}"
            ),
            LinalgError::LengthMismatch { expected, found } => {
                write!(f, "Linalg Error: Length mismatch: expected {expected}, found {found}")
            }
            LinalgError::InsufficientData { observations, unknowns } => write!(
                f,
                "Linalg Error: {observations} observations cannot determine {unknowns} unknowns"
            ),

            // ---- Data ----
            LinalgError::NonFinite { row, col, value } => {
                write!(f, "Linalg Error: Non-finite entry {value} at ({row}, {col})")
            }

            // ---- Numerical ----
            LinalgError::SingularNormalMatrix => {
                write!(f, "Linalg Error: Normal equations are singular")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<LinalgError> for PyErr {
    fn from(err: LinalgError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Spot-check messages carry the offending values.
    //
    // Given
    // -----
    // - NotSquare 2x3 and NonFinite NaN at (1, 0).
    //
    // Expect
    // ------
    // - The shape and the offending position appear in the text.
    fn display_includes_context() {
        let shape = LinalgError::NotSquare { rows: 2, cols: 3 }.to_string();
        let non_finite = LinalgError::NonFinite { row: 1, col: 0, value: f64::NAN }.to_string();

        assert!(shape.contains("2x3"));
        assert!(non_finite.contains("NaN at (1, 0)"));
    }
}
