//! rust_numerics — steepest descent and small linear-algebra utilities with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the minimizer and the linear-algebra helpers to Python via the
//! `_rust_numerics` extension module. When the `python-bindings` feature is
//! enabled, this module defines the Python-facing functions, the outcome class,
//! and the `optimize` / `linalg` submodules.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`symbolic`, `optimization`, `linalg`) as
//!   the public crate surface.
//! - Define `#[pyfunction]` wrappers, one `#[pyclass]` outcome type, and the
//!   `#[pymodule]` initializer for the `_rust_numerics` Python extension.
//! - Register the Python submodules in `sys.modules` so that dot-notation
//!   imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Objectives cross the boundary as formula strings plus an ordered list of
//!   variable names; they are parsed and differentiated once on the Rust side.
//!
//! Conventions
//! -----------
//! - Keyword names and defaults of `optimize.steepest_descent` match the Rust
//!   `SDOptions` surface (`err=1e-3`, `max_iter=1000`, `stop_criteria="sc_diff"`,
//!   `step_type="opt"`).
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the integration tests under `tests/`.

pub mod linalg;
pub mod optimization;
pub mod symbolic;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::IntoPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyTuple},
};

#[cfg(feature = "python-bindings")]
use crate::{
    linalg::{self as la, SolutionKind},
    optimization::steepest_descent::{self as sd, SDOutcome},
    utils::{build_sd_options, extract_matrix, extract_vector},
};

/// SteepestDescentOutcome — Python-facing view of a minimizer run.
///
/// Notes
/// -----
/// - Returned by `optimize.minimize`; Rust code should use [`SDOutcome`]
///   directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_numerics.optimize")]
pub struct SteepestDescentOutcome {
    pub inner: SDOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SteepestDescentOutcome {
    #[getter]
    pub fn point(&self) -> Vec<f64> {
        self.inner.point.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn grad_norm(&self) -> f64 {
        self.inner.grad_norm
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn trajectory(&self) -> Option<Vec<Vec<f64>>> {
        self.inner
            .trajectory
            .as_ref()
            .map(|t| t.rows().into_iter().map(|row| row.to_vec()).collect())
    }
}

/// Minimize `func` over `vars` by steepest descent.
///
/// Returns the final point, or `(point, trajectory)` when `full_output` is
/// true. Unknown `stop_criteria` / `step_type` names raise `ValueError`
/// before any evaluation.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "steepest_descent",
    signature = (
        func, vars, start = None, *, err = 1e-3, max_iter = 1000,
        stop_criteria = "sc_diff", step_type = "opt", step = None, full_output = false,
        verbose = false
    )
)]
#[allow(clippy::too_many_arguments)]
fn py_steepest_descent<'py>(
    py: Python<'py>, func: &str, vars: Vec<String>, start: Option<&Bound<'py, PyAny>>,
    err: f64, max_iter: usize, stop_criteria: &str, step_type: &str, step: Option<f64>,
    full_output: bool, verbose: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let outcome = run_minimizer(
        py,
        func,
        vars,
        start,
        err,
        max_iter,
        stop_criteria,
        step_type,
        step,
        full_output,
        verbose,
    )?;
    let point = outcome.point.into_pyarray(py).into_any();
    match outcome.trajectory {
        Some(trajectory) => {
            let trajectory = trajectory.into_pyarray(py).into_any();
            Ok(PyTuple::new(py, [point, trajectory])?.into_any())
        }
        None => Ok(point),
    }
}

/// Same as `steepest_descent`, returning a `SteepestDescentOutcome`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "minimize",
    signature = (
        func, vars, start = None, *, err = 1e-3, max_iter = 1000,
        stop_criteria = "sc_diff", step_type = "opt", step = None, full_output = false,
        verbose = false
    )
)]
#[allow(clippy::too_many_arguments)]
fn py_minimize<'py>(
    py: Python<'py>, func: &str, vars: Vec<String>, start: Option<&Bound<'py, PyAny>>,
    err: f64, max_iter: usize, stop_criteria: &str, step_type: &str, step: Option<f64>,
    full_output: bool, verbose: bool,
) -> PyResult<SteepestDescentOutcome> {
    let inner = run_minimizer(
        py,
        func,
        vars,
        start,
        err,
        max_iter,
        stop_criteria,
        step_type,
        step,
        full_output,
        verbose,
    )?;
    Ok(SteepestDescentOutcome { inner })
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn run_minimizer<'py>(
    py: Python<'py>, func: &str, vars: Vec<String>, start: Option<&Bound<'py, PyAny>>,
    err: f64, max_iter: usize, stop_criteria: &str, step_type: &str, step: Option<f64>,
    full_output: bool, verbose: bool,
) -> PyResult<SDOutcome> {
    let opts =
        build_sd_options(err, max_iter, stop_criteria, step_type, step, full_output, verbose)?;
    let start = start.map(|s| extract_vector(py, s)).transpose()?;
    Ok(sd::minimize_expr(func, &vars, start, &opts)?)
}

/// Classify a linear system from its augmented matrix.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "lin_sol")]
fn py_lin_sol(augmented_matrix: &Bound<'_, PyAny>) -> PyResult<&'static str> {
    let kind: SolutionKind = la::lin_sol(&extract_matrix(augmented_matrix)?)?;
    Ok(kind.label())
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "linear_solutions")]
fn py_linear_solutions(augmented_matrix: &Bound<'_, PyAny>) -> PyResult<&'static str> {
    py_lin_sol(augmented_matrix)
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "matrix_rank")]
fn py_matrix_rank(a: &Bound<'_, PyAny>) -> PyResult<usize> {
    Ok(la::matrix_rank(&extract_matrix(a)?)?)
}

/// Return `(D, P)` with `A P = P D`.
///
/// Both arrays are `float64` for a real spectrum and `complex128`
/// otherwise. Defective matrices return a singular `P`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "diagonalize")]
fn py_diagonalize<'py>(py: Python<'py>, a: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyTuple>> {
    let diag = la::diagonalize(&extract_matrix(a)?)?;
    let (d, p) = match diag.real_factors() {
        Some((d, p)) => (d.into_pyarray(py).into_any(), p.into_pyarray(py).into_any()),
        None => (diag.d.into_pyarray(py).into_any(), diag.p.into_pyarray(py).into_any()),
    };
    PyTuple::new(py, [d, p])
}

/// Return `(independent, singular_values, tolerance)` for the columns of
/// `vectors`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "linear_independence")]
fn py_linear_independence<'py>(
    py: Python<'py>, vectors: &Bound<'py, PyAny>,
) -> PyResult<(bool, Bound<'py, PyAny>, f64)> {
    let report = la::linear_independence(&extract_matrix(vectors)?)?;
    Ok((report.independent, report.singular_values.into_pyarray(py).into_any(), report.tolerance))
}

/// Return `(intercept, slope)` of the least-squares line.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "fit_line")]
fn py_fit_line<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
) -> PyResult<(f64, f64)> {
    let fit = la::fit_line(&extract_vector(py, x)?, &extract_vector(py, y)?)?;
    Ok((fit.intercept, fit.slope))
}

/// Polynomial coefficients in ascending powers.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "polyfit")]
fn py_polyfit<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, degree: usize,
) -> PyResult<Bound<'py, PyAny>> {
    let coefficients = la::polyfit(&extract_vector(py, x)?, &extract_vector(py, y)?, degree)?;
    Ok(coefficients.into_pyarray(py).into_any())
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "least_squares")]
fn py_least_squares<'py>(
    py: Python<'py>, design: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyAny>> {
    let x = la::least_squares(&extract_matrix(design)?, &extract_vector(py, y)?)?;
    Ok(x.into_pyarray(py).into_any())
}

/// _rust_numerics — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_numerics` Python module and register its `optimize` and
/// `linalg` submodules.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating submodules or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_numerics<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let optimize_mod = PyModule::new(_py, "optimize")?;
    let linalg_mod = PyModule::new(_py, "linalg")?;
    optimize_module(_py, m, &optimize_mod)?;
    linalg_module(_py, m, &linalg_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_numerics.optimize", optimize_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("rust_numerics.linalg", linalg_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn optimize_module<'py>(
    _py: Python, rust_numerics: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_steepest_descent, m)?)?;
    m.add_function(wrap_pyfunction!(py_minimize, m)?)?;
    m.add_class::<SteepestDescentOutcome>()?;
    rust_numerics.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn linalg_module<'py>(
    _py: Python, rust_numerics: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_lin_sol, m)?)?;
    m.add_function(wrap_pyfunction!(py_linear_solutions, m)?)?;
    m.add_function(wrap_pyfunction!(py_matrix_rank, m)?)?;
    m.add_function(wrap_pyfunction!(py_diagonalize, m)?)?;
    m.add_function(wrap_pyfunction!(py_linear_independence, m)?)?;
    m.add_function(wrap_pyfunction!(py_fit_line, m)?)?;
    m.add_function(wrap_pyfunction!(py_polyfit, m)?)?;
    m.add_function(wrap_pyfunction!(py_least_squares, m)?)?;
    rust_numerics.add_submodule(m)?;
    Ok(())
}
