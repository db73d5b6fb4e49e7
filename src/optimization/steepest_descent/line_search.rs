//! steepest_descent::line_search — bounded step-size selection.
//!
//! Purpose
//! -------
//! Choose the step `α` for one descent iteration by minimizing
//! `φ(α) = f(p − α∇f(p))` over a closed interval with argmin's bounded
//! Brent solver.
//!
//! Key behaviors
//! -------------
//! - [`LineSearchProblem`] exposes `φ` as an argmin [`CostFunction`] over
//!   plain `f64` parameters.
//! - Trial points where `f` is non-finite are scored as
//!   [`NON_FINITE_PENALTY`], so the search backs away from them instead of
//!   failing. A finite sentinel keeps Brent's parabolic steps free of
//!   `inf − inf`.
//! - Errors raised by the objective abort the search and are recovered as
//!   [`OptError`] values by the `From<argmin::core::Error>` conversion.
//!
//! Invariants & assumptions
//! ------------------------
//! - `bounds` has already been validated (`0 <= lower < upper`).
//! - Each search is capped at [`LINE_SEARCH_MAX_ITER`] Brent iterations.
use argmin::core::{CostFunction, Error, Executor};
use argmin::solver::brent::BrentOpt;

use crate::optimization::{
    errors::{OptError, OptResult},
    steepest_descent::{
        adapter::ObjectiveAdapter,
        traits::Objective,
        types::{BrentLS, Grad, LINE_SEARCH_MAX_ITER, Point},
    },
};

/// Score given to trial steps where the objective is not finite.
pub const NON_FINITE_PENALTY: f64 = 1e150;

/// `φ(α) = f(p − α g)` for a fixed point `p` and direction `g`.
pub struct LineSearchProblem<'a, O: Objective + ?Sized> {
    adapter: ObjectiveAdapter<'a, O>,
    point: &'a Point,
    grad: &'a Grad,
}

impl<'a, O: Objective + ?Sized> LineSearchProblem<'a, O> {
    pub fn new(adapter: ObjectiveAdapter<'a, O>, point: &'a Point, grad: &'a Grad) -> Self {
        Self { adapter, point, grad }
    }

    /// The point reached with step `alpha`.
    pub fn trial_point(&self, alpha: f64) -> Point {
        let mut trial = self.point.clone();
        trial.scaled_add(-alpha, self.grad);
        trial
    }
}

impl<O: Objective + ?Sized> CostFunction for LineSearchProblem<'_, O> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, alpha: &Self::Param) -> Result<Self::Output, Error> {
        let value = self.adapter.value(&self.trial_point(*alpha))?;
        if value.is_finite() { Ok(value.min(NON_FINITE_PENALTY)) } else { Ok(NON_FINITE_PENALTY) }
    }
}

/// Step size minimizing `f(p − α∇f(p))` over `α ∈ [bounds.0, bounds.1]`.
///
/// When `verbose` is set and the `obs_slog` feature is enabled, a terminal
/// slog observer reports every Brent iteration.
///
/// # Errors
/// - Any objective error raised while evaluating trial points.
/// - Backend errors from the Brent solver.
/// - [`OptError::MissingAlpha`] if the solver finishes without a best
///   parameter.
pub fn line_search<O: Objective + ?Sized>(
    adapter: ObjectiveAdapter<'_, O>, point: &Point, grad: &Grad, bounds: (f64, f64),
    verbose: bool,
) -> OptResult<f64> {
    let problem = LineSearchProblem::new(adapter, point, grad);
    let solver: BrentLS = BrentOpt::new(bounds.0, bounds.1);

    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.max_iters(LINE_SEARCH_MAX_ITER));
    #[cfg(feature = "obs_slog")]
    if verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    #[cfg(not(feature = "obs_slog"))]
    let _ = verbose;

    let mut state = executor.run()?.state().clone();
    let best = state.take_best_param().ok_or(OptError::MissingAlpha)?;
    if state.get_best_cost() < NON_FINITE_PENALTY {
        Ok(best)
    } else {
        Err(OptError::NonFiniteCost { value: f64::INFINITY })
    }
}
