//! High-level entry points for steepest-descent minimization.
use crate::optimization::{
    errors::OptResult,
    steepest_descent::{
        adapter::ObjectiveAdapter,
        objective::SymbolicObjective,
        run::run_descent,
        traits::{Objective, SDOptions, SDOutcome},
        types::Point,
        validation::validate_start,
    },
};

/// Minimize `f` by steepest descent.
///
/// # Behavior
/// - Re-validates `opts` (its fields are public).
/// - Uses the origin of dimension `objective.dim()` when `start` is `None`.
/// - Delegates the loop to [`run_descent`], which takes at least one step
///   and at most `opts.max_iter`.
///
/// # Errors
/// - Option validation errors.
/// - [`crate::optimization::errors::OptError::StartDimMismatch`] /
///   [`crate::optimization::errors::OptError::InvalidStart`] for a bad start.
/// - Objective, gradient and line-search errors from the loop.
///
/// # Example
/// ```no_run
/// use rust_numerics::optimization::steepest_descent::{
///     steepest_descent, SDOptions, SymbolicObjective,
/// };
///
/// let f = SymbolicObjective::new("(x - 1)^2 + (y + 2)^2", &["x", "y"])?;
/// let opts = SDOptions::from_names(1e-8, 500, "sc_diff", "opt", None, true)?;
/// let out = steepest_descent(&f, None, &opts)?;
/// println!("p* = {}, after {} iterations", out.point, out.iterations);
/// # Ok::<(), rust_numerics::optimization::errors::OptError>(())
/// ```
pub fn steepest_descent<O: Objective + ?Sized>(
    objective: &O, start: Option<Point>, opts: &SDOptions,
) -> OptResult<SDOutcome> {
    opts.validate()?;
    let dim = objective.dim();
    let start = start.unwrap_or_else(|| Point::zeros(dim));
    validate_start(&start, dim)?;
    run_descent(ObjectiveAdapter::new(objective), start, opts)
}

/// Parse `source`, compile it over `vars`, and minimize it.
///
/// # Errors
/// - [`crate::optimization::errors::OptError::Symbolic`] for parse and
///   compilation errors.
/// - Everything [`steepest_descent`] can return.
pub fn minimize_expr<S: AsRef<str>>(
    source: &str, vars: &[S], start: Option<Point>, opts: &SDOptions,
) -> OptResult<SDOutcome> {
    let objective = SymbolicObjective::new(source, vars)?;
    steepest_descent(&objective, start, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, steepest_descent::objective::FnObjective};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Default start at the origin.
    // - Start-point and option validation at the entry point.
    // - Line-search convergence on symbolic and closure objectives.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the origin is used when no start is given.
    //
    // Given
    // -----
    // - f(x, y) = (x - 1)^2 + 2*(y + 3)^2, err = 1e-10, full output.
    //
    // Expect
    // ------
    // - Trajectory row 0 is (0, 0); the result is close to (1, -3).
    fn defaults_to_origin_and_converges() {
        // Arrange
        let opts = SDOptions::from_names(1e-10, 1000, "sc_diff", "opt", None, true).expect("opts");

        // Act
        let out = minimize_expr("(x - 1)^2 + 2*(y + 3)^2", &["x", "y"], None, &opts)
            .expect("minimize");

        // Assert
        let traj = out.trajectory.as_ref().expect("trajectory");
        assert_eq!(traj.row(0).to_vec(), vec![0.0, 0.0]);
        assert!(out.converged);
        assert_abs_diff_eq!(out.point[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.point[1], -3.0, epsilon = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a start of the wrong length is rejected before iterating.
    //
    // Given
    // -----
    // - A two-variable objective and a three-element start.
    //
    // Expect
    // ------
    // - StartDimMismatch { expected: 2, found: 3 }.
    fn start_dimension_is_checked() {
        let opts = SDOptions::default();

        let result = minimize_expr("x + y", &["x", "y"], Some(array![0.0, 0.0, 0.0]), &opts);

        assert_eq!(result.err(), Some(OptError::StartDimMismatch { expected: 2, found: 3 }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure hand-edited options are re-validated.
    //
    // Given
    // -----
    // - Default options with `err` overwritten to 0.
    //
    // Expect
    // ------
    // - InvalidErr.
    fn hand_edited_options_are_revalidated() {
        let opts = SDOptions { err: 0.0, ..SDOptions::default() };

        let result = minimize_expr("x^2", &["x"], None, &opts);

        assert!(matches!(result, Err(OptError::InvalidErr { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check closure objectives converge through the finite-difference path.
    //
    // Given
    // -----
    // - f(p) = (p0 - 2)² + (p1 + 1)² as a closure, start (0, 0).
    //
    // Expect
    // ------
    // - Result within 1e-3 of (2, -1).
    fn closure_objective_converges_with_finite_differences() {
        let f = FnObjective::new(2, |p: &Point| (p[0] - 2.0).powi(2) + (p[1] + 1.0).powi(2));
        let opts = SDOptions::from_names(1e-8, 500, "gradient", "opt", None, false).expect("opts");

        let out = steepest_descent(&f, None, &opts).expect("minimize");

        assert!(out.trajectory.is_none());
        assert_abs_diff_eq!(out.point[0], 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.point[1], -1.0, epsilon = 1e-3);
    }
}
