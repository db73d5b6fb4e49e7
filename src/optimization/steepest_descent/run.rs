//! Execution loop for steepest descent.
//!
//! Each iteration from the current point `p`:
//! 1. picks `α` from the [`StepRule`] (bounded line search or constant),
//! 2. moves to `p_next = p − α∇f(p)`,
//! 3. evaluates `f` and `∇f` at `p_next` and tests the [`StopCriterion`]
//!    against the previous value,
//! 4. records `p_next` when a trajectory was requested.
//!
//! The loop always runs at least one iteration and never more than
//! `max_iter`. The gradient computed at `p_next` is reused as the next
//! search direction, so every point is differentiated exactly once.
//!
//! Only the start is required to be finite. A run that overflows keeps
//! iterating on `inf`/`NaN` values; every criterion compares with a strict
//! `<`, so a `NaN` never signals convergence and `max_iter` ends the run.
use argmin::core::TerminationReason;
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
use ndarray::Array2;

#[cfg(feature = "obs_slog")]
use crate::optimization::steepest_descent::types::Grad;

use crate::optimization::{
    errors::OptResult,
    steepest_descent::{
        adapter::ObjectiveAdapter,
        line_search::line_search,
        traits::{Objective, SDOptions, SDOutcome, StepRule},
        types::{Point, Trajectory},
        validation::validate_value,
    },
};

/// Run the descent loop from `start` (already validated against the
/// objective dimension).
///
/// # Errors
/// - [`crate::optimization::errors::OptError::NonFiniteCost`] if `f(start)`
///   is not finite.
/// - Gradient validation errors: dimension everywhere, finiteness at the
///   start only.
/// - Any objective or line-search error, unmodified.
pub fn run_descent<O: Objective + ?Sized>(
    adapter: ObjectiveAdapter<'_, O>, start: Point, opts: &SDOptions,
) -> OptResult<SDOutcome> {
    let dim = start.len();
    let mut point = start;
    let mut value = adapter.value(&point)?;
    validate_value(value)?;
    let mut grad = adapter.gradient(&point)?;

    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(value, &grad);
    }

    let mut visited: Option<Vec<Point>> = opts.full_output.then(|| vec![point.clone()]);
    let mut iterations = 0;
    let mut reason = TerminationReason::MaxItersReached;

    while iterations < opts.max_iter {
        let alpha = match opts.step_rule {
            StepRule::Optimal { bounds } => {
                line_search(adapter, &point, &grad, bounds, opts.verbose)?
            }
            StepRule::Fixed { step } => step,
        };

        let mut next = point.clone();
        next.scaled_add(-alpha, &grad);
        let next_value = adapter.value(&next)?;
        let next_grad = adapter.iterate_gradient(&next)?;
        let stop = opts.stop_criterion.is_met(value, next_value, &next_grad, opts.err);

        if let Some(rows) = visited.as_mut() {
            rows.push(next.clone());
        }
        point = next;
        value = next_value;
        grad = next_grad;
        iterations += 1;

        #[cfg(feature = "obs_slog")]
        if opts.verbose {
            log_iteration(iterations, alpha, value, &grad);
        }

        if stop {
            reason = TerminationReason::SolverConverged;
            break;
        }
    }

    let trajectory = visited.map(|rows| stack_rows(&rows, dim));
    Ok(SDOutcome::new(point, value, &grad, iterations, reason, trajectory))
}

fn stack_rows(rows: &[Point], dim: usize) -> Trajectory {
    Array2::from_shape_fn((rows.len(), dim), |(i, j)| rows[i][j])
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state(value: f64, grad: &Grad) {
    eprintln!("init: f(p0) = {:.6}, ||grad|| = {:.6}", value, grad.l2_norm());
}

#[cfg(feature = "obs_slog")]
fn log_iteration(iteration: usize, alpha: f64, value: f64, grad: &Grad) {
    eprintln!(
        "iter {:>5}: alpha = {:.6e}, f = {:.6}, ||grad|| = {:.6e}",
        iteration,
        alpha,
        value,
        grad.l2_norm()
    );
}
