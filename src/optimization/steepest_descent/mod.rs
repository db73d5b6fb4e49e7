//! steepest_descent — gradient descent with pluggable stopping and step rules.
//!
//! Purpose
//! -------
//! Minimize a scalar objective `f(p)` over `p ∈ ℝⁿ` by repeatedly moving
//! against the gradient. Callers either implement [`Objective`] themselves,
//! wrap a closure in [`FnObjective`], or hand a formula to
//! [`minimize_expr`] / [`SymbolicObjective`], which derives the gradient
//! symbolically once before the loop starts.
//!
//! Key behaviors
//! -------------
//! - String-keyed options (`stop_criteria`, `step_type`) are parsed into
//!   [`StopCriterion`] and [`StepRule`] when [`SDOptions`] is built, so the
//!   loop never branches on strings and invalid names fail before any
//!   evaluation.
//! - Step sizes come from a bounded Brent line search over `[0, 10]` by
//!   default ([`line_search`]) or from a caller-supplied constant.
//! - Three stopping rules are available ([`criteria`]): scaled or absolute
//!   change in `f`, and gradient norm at the new point.
//! - Objectives without an analytic gradient are differentiated with
//!   central (then forward) finite differences ([`finite_diff`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every point passed to an objective has length `objective.dim()`.
//! - `max_iter` is always enforced and at least one step is taken.
//! - No point is mutated in place after it has been recorded; each
//!   iteration produces a fresh point.
//!
//! Conventions
//! -----------
//! - Points, gradients and trajectories use the `ndarray` aliases in
//!   [`types`]; trajectories store one point per row.
//! - Fallible operations return [`crate::optimization::errors::OptResult`].
//! - The library prints nothing unless `SDOptions::verbose` is set and the
//!   `obs_slog` feature is enabled.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover parsing, validation, line-search
//!   accuracy, criterion formulas and loop bookkeeping.
//! - `tests/integration_steepest_descent.rs` exercises the public surface
//!   end to end.

pub mod adapter;
pub mod api;
pub mod criteria;
pub mod finite_diff;
pub mod line_search;
pub mod objective;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize_expr, steepest_descent};
pub use self::objective::{FnObjective, SymbolicObjective};
pub use self::traits::{Objective, SDOptions, SDOutcome, StepRule, StepType, StopCriterion};
pub use self::types::{
    Cost, DEFAULT_ERR, DEFAULT_FIXED_STEP, DEFAULT_LINE_SEARCH_BOUNDS, DEFAULT_MAX_ITER, Grad,
    Point, Trajectory,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_numerics::optimization::steepest_descent::prelude::*;
//
// to import the main minimizer surface in a single line.

pub mod prelude {
    pub use super::api::{minimize_expr, steepest_descent};
    pub use super::objective::{FnObjective, SymbolicObjective};
    pub use super::traits::{Objective, SDOptions, SDOutcome, StepRule, StopCriterion};
    pub use super::types::{Grad, Point, Trajectory};
}
