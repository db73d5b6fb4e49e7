//! linalg::eigen — eigendecomposition of real square matrices.
//!
//! Purpose
//! -------
//! Factor a real `n×n` matrix into the diagonal eigenvalue matrix `D` and
//! the eigenvector matrix `P` (eigenvectors as columns) so that
//! `A P = P D`. Like a general-purpose `eig`, the result is complex-valued:
//! real matrices can have complex-conjugate eigenpairs.
//!
//! Key behaviors
//! -------------
//! - Symmetric input (up to [`SYMMETRY_TOL`]) uses nalgebra's symmetric
//!   eigensolver; `P` is then real and orthonormal.
//! - General input takes its eigenvalues from the real Schur form.
//!   Imaginary parts within [`IMAG_TOL`] are snapped to zero. Eigenvalues
//!   that agree up to [`CLUSTER_TOL`] are grouped, and each group's
//!   eigenvectors are read off the null space of `A − λI` from its SVD
//!   (in real arithmetic for real `λ`, complex arithmetic otherwise).
//! - A defective matrix is not an error. When an eigenvalue has fewer
//!   independent eigenvectors than its multiplicity, the missing columns
//!   repeat the ones found, so `A P = P D` still holds but `P` is singular.
//!   [`Diagonalization::diagonalizable`] records whether that happened.
//!
//! Invariants & assumptions
//! ------------------------
//! - Eigenvalues are ordered by real part, then imaginary part; each
//!   eigenvector has unit Euclidean norm.
//! - Real eigenvalues carry an exactly-zero imaginary part and real
//!   eigenvectors, so [`Diagonalization::real_factors`] succeeds on real
//!   spectra.
//! - All tolerances are relative to `max(1, ‖A‖_max)`.
use nalgebra::{Complex, DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::linalg::{
    conversion::{check_square, to_dmatrix},
    errors::LinalgResult,
};

/// Relative asymmetry tolerated before the general path is used.
pub const SYMMETRY_TOL: f64 = 1e-12;

/// Relative imaginary part below which an eigenvalue is treated as real.
pub const IMAG_TOL: f64 = 1e-10;

/// Relative distance under which eigenvalues are treated as repeated.
pub const CLUSTER_TOL: f64 = 1e-8;

/// Relative singular-value cut-off for the null space of `A − λI`.
pub const NULL_SPACE_TOL: f64 = 1e-8;

pub type C64 = Complex<f64>;

/// Result of [`diagonalize`].
///
/// - `eigenvalues`: with multiplicity, ordered by `(re, im)`.
/// - `d`: `diag(eigenvalues)`.
/// - `p`: matching unit eigenvectors as columns.
/// - `diagonalizable`: `false` when some eigenvalue lacked a full
///   eigenspace and `p` had to repeat columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagonalization {
    pub eigenvalues: Array1<C64>,
    pub d: Array2<C64>,
    pub p: Array2<C64>,
    pub diagonalizable: bool,
}

impl Diagonalization {
    fn from_pairs(mut pairs: Vec<(C64, DVector<C64>)>, n: usize, diagonalizable: bool) -> Self {
        pairs.sort_by(|a, b| a.0.re.total_cmp(&b.0.re).then(a.0.im.total_cmp(&b.0.im)));
        let eigenvalues = Array1::from_iter(pairs.iter().map(|(lambda, _)| *lambda));
        let d = Array2::from_diag(&eigenvalues);
        let p = Array2::from_shape_fn((n, pairs.len()), |(i, j)| pairs[j].1[i]);
        Self { eigenvalues, d, p, diagonalizable }
    }

    /// `true` when every eigenvalue and eigenvector entry is real.
    pub fn is_real(&self) -> bool {
        self.eigenvalues.iter().chain(self.p.iter()).all(|z| z.im == 0.0)
    }

    /// `(D, P)` as real matrices, or `None` for a complex spectrum.
    pub fn real_factors(&self) -> Option<(Array2<f64>, Array2<f64>)> {
        self.is_real().then(|| (self.d.mapv(|z| z.re), self.p.mapv(|z| z.re)))
    }
}

/// Eigendecomposition `A P = P D` of a real square matrix.
///
/// # Errors
/// - [`crate::linalg::errors::LinalgError::EmptyMatrix`],
///   [`crate::linalg::errors::LinalgError::NotSquare`],
///   [`crate::linalg::errors::LinalgError::NonFinite`] for invalid input.
pub fn diagonalize(a: &Array2<f64>) -> LinalgResult<Diagonalization> {
    check_square(a)?;
    let n = a.nrows();
    let scale = a.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    let m = to_dmatrix(a);

    if is_symmetric(&m, SYMMETRY_TOL * scale) {
        let eigen = m.symmetric_eigen();
        let pairs = eigen
            .eigenvalues
            .iter()
            .enumerate()
            .map(|(k, &lambda)| {
                (C64::new(lambda, 0.0), to_complex(&eigen.eigenvectors.column(k).into_owned()))
            })
            .collect();
        return Ok(Diagonalization::from_pairs(pairs, n, true));
    }

    let eigenvalues = snapped_eigenvalues(&m, IMAG_TOL * scale);
    let mut pairs = Vec::with_capacity(n);
    let mut diagonalizable = true;
    for (lambda, algebraic) in cluster(eigenvalues, CLUSTER_TOL * scale) {
        let vectors = if lambda.im == 0.0 {
            real_null_space(&m, lambda.re, NULL_SPACE_TOL * scale)
        } else {
            complex_null_space(&m, lambda, NULL_SPACE_TOL * scale)
        };
        diagonalizable &= vectors.len() >= algebraic;
        pairs.extend(vectors.iter().cycle().take(algebraic).map(|v| (lambda, v.clone())));
    }
    Ok(Diagonalization::from_pairs(pairs, n, diagonalizable))
}

fn is_symmetric(m: &DMatrix<f64>, tol: f64) -> bool {
    let n = m.nrows();
    (0..n).all(|i| (0..i).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= tol))
}

fn snapped_eigenvalues(m: &DMatrix<f64>, tol: f64) -> Vec<C64> {
    m.complex_eigenvalues()
        .iter()
        .map(|z| if z.im.abs() <= tol { C64::new(z.re, 0.0) } else { *z })
        .collect()
}

/// Group eigenvalues within `tol` of a group's first member; returns
/// `(mean, count)` per group.
fn cluster(values: Vec<C64>, tol: f64) -> Vec<(C64, usize)> {
    let mut groups: Vec<Vec<C64>> = Vec::new();
    for v in values {
        match groups.iter_mut().find(|g| (g[0] - v).norm() <= tol) {
            Some(group) => group.push(v),
            None => groups.push(vec![v]),
        }
    }
    groups
        .into_iter()
        .map(|g| {
            let count = g.len();
            let mean = g.iter().sum::<C64>() / count as f64;
            // Keep real groups exactly real.
            let mean = if g.iter().all(|z| z.im == 0.0) { C64::new(mean.re, 0.0) } else { mean };
            (mean, count)
        })
        .collect()
}

/// Indices of singular values in ascending order: every index at or below
/// `tol`, and at least the smallest one.
fn null_indices(singular_values: &DVector<f64>, tol: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..singular_values.len()).collect();
    order.sort_by(|&a, &b| singular_values[a].total_cmp(&singular_values[b]));
    let nullity = order.iter().take_while(|&&k| singular_values[k] <= tol).count();
    order.truncate(nullity.max(1));
    order
}

fn real_null_space(m: &DMatrix<f64>, lambda: f64, tol: f64) -> Vec<DVector<C64>> {
    let n = m.nrows();
    let shifted = m - DMatrix::<f64>::identity(n, n) * lambda;
    let svd = shifted.svd(false, true);
    let Some(v_t) = svd.v_t else {
        return Vec::new();
    };
    null_indices(&svd.singular_values, tol)
        .into_iter()
        .map(|k| to_complex(&v_t.row(k).transpose()))
        .collect()
}

fn complex_null_space(m: &DMatrix<f64>, lambda: C64, tol: f64) -> Vec<DVector<C64>> {
    let n = m.nrows();
    let shifted = m.map(|x| C64::new(x, 0.0)) - DMatrix::<C64>::identity(n, n) * lambda;
    let svd = shifted.svd(false, true);
    let Some(v_t) = svd.v_t else {
        return Vec::new();
    };
    null_indices(&svd.singular_values, tol).into_iter().map(|k| v_t.row(k).adjoint()).collect()
}

fn to_complex(v: &DVector<f64>) -> DVector<C64> {
    v.map(|x| C64::new(x, 0.0))
}

/// Reassemble `P D P⁻¹`; `None` if `P` is singular.
pub fn reconstruct(diag: &Diagonalization) -> Option<Array2<C64>> {
    let (rows, cols) = diag.p.dim();
    let p = DMatrix::from_fn(rows, cols, |i, j| diag.p[[i, j]]);
    let d = DMatrix::from_fn(cols, cols, |i, j| diag.d[[i, j]]);
    let p_inv = p.clone().try_inverse()?;
    let rebuilt = p * d * p_inv;
    Some(Array2::from_shape_fn((rows, rows), |(i, j)| rebuilt[(i, j)]))
}
