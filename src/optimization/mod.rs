//! optimization — steepest-descent minimizer and unified error surface.
//!
//! Purpose
//! -------
//! Provide a small, self-contained minimization layer: callers describe a
//! scalar objective (symbolically, as a closure, or via the [`steepest_descent::Objective`]
//! trait), choose a stopping rule and a step strategy, and obtain the
//! minimizing point plus diagnostics without touching backend solver
//! details.
//!
//! Key behaviors
//! -------------
//! - Expose steepest descent (`steepest_descent`) with three stopping
//!   criteria and two step-selection strategies (bounded Brent line search
//!   or constant step).
//! - Normalize configuration issues, numerical failures, symbolic-layer
//!   errors and backend solver errors into a single enum
//!   (`errors::OptError`) with a common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are validated before the first objective evaluation; invalid
//!   states are reported as `OptError`, not panics.
//! - The iteration cap is always enforced.
//!
//! Conventions
//! -----------
//! - The minimizer always *minimizes* `f(p)`.
//! - Points, gradients and trajectories are `ndarray`-based aliases.
//! - Public entry points that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors.
//!
//! Downstream usage
//! ----------------
//! - Front-ends import the curated surface via `optimization::prelude::*`
//!   or depend on `steepest_descent::prelude` directly.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns (parsing,
//!   validation, line search, stopping rules, loop bookkeeping).
//! - `errors` tests cover conversions from argmin and symbolic errors.

pub mod errors;
pub mod steepest_descent;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_numerics::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::steepest_descent::prelude::*;
}
