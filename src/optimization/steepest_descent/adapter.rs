//! Adapter that gives the descent loop one validated view of an [`Objective`].
//!
//! The loop and the line search only talk to [`ObjectiveAdapter`]:
//! - `value` forwards to the user's `value`;
//! - `gradient` uses the analytic gradient when one is provided (and
//!   validates it), otherwise falls back to finite differences of `value`.
//! - `iterate_gradient` does the same with a dimension-only check, so a
//!   diverging run can carry non-finite gradients to the iteration cap.
use crate::optimization::{
    errors::{OptError, OptResult},
    steepest_descent::{
        finite_diff::{fd_gradient, fd_gradient_unchecked},
        traits::Objective,
        types::{Cost, Grad, Point},
        validation::{validate_grad, validate_grad_dim},
    },
};

pub struct ObjectiveAdapter<'a, O: Objective + ?Sized> {
    pub f: &'a O,
}

impl<O: Objective + ?Sized> Clone for ObjectiveAdapter<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Objective + ?Sized> Copy for ObjectiveAdapter<'_, O> {}

impl<'a, O: Objective + ?Sized> ObjectiveAdapter<'a, O> {
    pub fn new(f: &'a O) -> Self {
        Self { f }
    }

    pub fn dim(&self) -> usize {
        self.f.dim()
    }

    /// Evaluate `f(p)`. Non-finite values are passed through; callers
    /// decide whether they are acceptable.
    pub fn value(&self, point: &Point) -> OptResult<Cost> {
        self.f.value(point)
    }

    /// Evaluate `∇f(p)`.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (other than
    ///   `GradientNotImplemented`) and from `value` during differencing.
    /// - Returns validation errors if the gradient has the wrong dimension
    ///   or non-finite entries.
    pub fn gradient(&self, point: &Point) -> OptResult<Grad> {
        let dim = point.len();
        match self.f.grad(point) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => fd_gradient(point, &|p: &Point| self.value(p)),
            Err(e) => Err(e),
        }
    }

    /// Evaluate `∇f` at an iterate produced by the loop.
    ///
    /// Only the dimension is checked: once a run diverges, `inf`/`NaN`
    /// entries are returned as they are and the iteration cap ends the run.
    ///
    /// # Errors
    /// - Propagates user errors as [`Self::gradient`] does.
    /// - [`OptError::GradientDimMismatch`] for a gradient of the wrong length.
    pub fn iterate_gradient(&self, point: &Point) -> OptResult<Grad> {
        match self.f.grad(point) {
            Ok(g) => {
                validate_grad_dim(&g, point.len())?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                fd_gradient_unchecked(point, &|p: &Point| self.value(p))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Analytic-gradient pass-through and validation.
    // - Finite-difference fallback when no gradient is implemented.
    //
    // They intentionally DO NOT cover:
    // - Line search or loop behavior.
    // -------------------------------------------------------------------------

    struct ValueOnly;

    impl Objective for ValueOnly {
        fn dim(&self) -> usize {
            2
        }
        fn value(&self, p: &Point) -> OptResult<Cost> {
            Ok(p[0] * p[0] + p[1])
        }
    }

    struct WrongGradient;

    impl Objective for WrongGradient {
        fn dim(&self) -> usize {
            2
        }
        fn value(&self, _p: &Point) -> OptResult<Cost> {
            Ok(0.0)
        }
        fn grad(&self, _p: &Point) -> OptResult<Grad> {
            Ok(array![1.0])
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the finite-difference fallback.
    //
    // Given
    // -----
    // - f(x, y) = x² + y without an analytic gradient, at (2, 5).
    //
    // Expect
    // ------
    // - ∇f ≈ [4, 1].
    fn falls_back_to_finite_differences() {
        // Arrange
        let adapter = ObjectiveAdapter::new(&ValueOnly);

        // Act
        let grad = adapter.gradient(&array![2.0, 5.0]).expect("gradient");

        // Assert
        assert_abs_diff_eq!(grad[0], 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure analytic gradients of the wrong length are rejected.
    //
    // Given
    // -----
    // - An objective of dim 2 returning a length-1 gradient.
    //
    // Expect
    // ------
    // - GradientDimMismatch { expected: 2, found: 1 }.
    fn rejects_analytic_gradient_of_wrong_length() {
        // Arrange
        let adapter = ObjectiveAdapter::new(&WrongGradient);

        // Act
        let result = adapter.gradient(&array![0.0, 0.0]);

        // Assert
        assert_eq!(result, Err(OptError::GradientDimMismatch { expected: 2, found: 1 }));
    }

    struct InfiniteGradient;

    impl Objective for InfiniteGradient {
        fn dim(&self) -> usize {
            1
        }
        fn value(&self, _p: &Point) -> OptResult<Cost> {
            Ok(f64::INFINITY)
        }
        fn grad(&self, _p: &Point) -> OptResult<Grad> {
            Ok(array![f64::NEG_INFINITY])
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that iterate gradients keep non-finite entries while the
    // strict path still rejects them.
    //
    // Given
    // -----
    // - An objective whose analytic gradient is [-inf].
    //
    // Expect
    // ------
    // - `gradient` fails with InvalidGradient.
    // - `iterate_gradient` returns [-inf].
    fn iterate_gradient_passes_non_finite_entries() {
        // Arrange
        let adapter = ObjectiveAdapter::new(&InfiniteGradient);
        let point = array![1.0];

        // Act
        let strict = adapter.gradient(&point);
        let lenient = adapter.iterate_gradient(&point).expect("gradient");

        // Assert
        assert!(matches!(strict, Err(OptError::InvalidGradient { index: 0, .. })));
        assert_eq!(lenient[0], f64::NEG_INFINITY);
    }
}
