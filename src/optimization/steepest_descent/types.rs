//! steepest_descent::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types, defaults and the line-search solver alias
//! used by the minimizer so the rest of the module can stay agnostic to
//! `ndarray` and `argmin` generics.
//!
//! Conventions
//! -----------
//! - `Point` and `Grad` have length equal to the number of variables.
//! - A `Trajectory` stores one visited point per row, starting with the
//!   start point.
//! - The line search is a bounded Brent minimisation over the step size
//!   `α`, working on plain `f64` parameters.
use argmin::solver::brent::BrentOpt;
use ndarray::{Array1, Array2};

/// Point `p` in the search space, one coordinate per variable.
pub type Point = Array1<f64>;

/// Gradient `∇f(p)`, matching the shape of `Point`.
pub type Grad = Array1<f64>;

/// Visited points, one per row (`iterations + 1` rows).
pub type Trajectory = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Bounded Brent minimiser over the step size `α`.
pub type BrentLS = BrentOpt<f64>;

/// Default target tolerance for the stopping criterion.
pub const DEFAULT_ERR: f64 = 1e-3;

/// Default hard cap on descent iterations.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default interval searched for the optimal step size.
pub const DEFAULT_LINE_SEARCH_BOUNDS: (f64, f64) = (0.0, 10.0);

/// Default constant step used when `step_type = "fix"` and no step is given.
pub const DEFAULT_FIXED_STEP: f64 = 0.1;

/// Iteration cap for each inner line search.
pub const LINE_SEARCH_MAX_ITER: u64 = 500;
