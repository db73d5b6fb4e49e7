//! Ready-made [`Objective`] implementations.
//!
//! - [`SymbolicObjective`]: an expression compiled once by
//!   [`crate::symbolic`], with its analytic gradient.
//! - [`FnObjective`]: a plain closure; gradients come from finite
//!   differences.
use std::borrow::Cow;
use std::fmt;

use ndarray::Array1;

use crate::{
    optimization::{
        errors::OptResult,
        steepest_descent::{
            traits::Objective,
            types::{Cost, Grad, Point},
        },
    },
    symbolic::{CompiledFunction, Expr},
};

/// Objective backed by a compiled symbolic expression.
///
/// The gradient expressions are derived and compiled at construction, so
/// evaluation inside the descent loop is a pair of stack-machine runs.
#[derive(Debug, Clone)]
pub struct SymbolicObjective {
    function: CompiledFunction,
}

impl SymbolicObjective {
    /// Parse `source` and compile it over the ordered `vars`.
    ///
    /// # Errors
    /// - [`crate::optimization::errors::OptError::Symbolic`] for parse
    ///   errors, empty or duplicate variables, or unbound symbols.
    pub fn new<S: AsRef<str>>(source: &str, vars: &[S]) -> OptResult<Self> {
        let function = CompiledFunction::from_source(source, vars)?;
        Ok(Self { function })
    }

    pub fn from_expr<S: AsRef<str>>(expr: Expr, vars: &[S]) -> OptResult<Self> {
        let function = CompiledFunction::new(expr, vars)?;
        Ok(Self { function })
    }

    pub fn function(&self) -> &CompiledFunction {
        &self.function
    }
}

impl Objective for SymbolicObjective {
    fn dim(&self) -> usize {
        self.function.dim()
    }

    fn value(&self, point: &Point) -> OptResult<Cost> {
        Ok(self.function.value(&as_args(point))?)
    }

    fn grad(&self, point: &Point) -> OptResult<Grad> {
        let grad = self.function.gradient(&as_args(point))?;
        Ok(Array1::from(grad))
    }
}

/// Objective wrapping a closure `f(p)` over a fixed dimension.
pub struct FnObjective<F: Fn(&Point) -> f64> {
    dim: usize,
    func: F,
}

impl<F: Fn(&Point) -> f64> FnObjective<F> {
    pub fn new(dim: usize, func: F) -> Self {
        Self { dim, func }
    }
}

impl<F: Fn(&Point) -> f64> fmt::Debug for FnObjective<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObjective").field("dim", &self.dim).finish_non_exhaustive()
    }
}

impl<F: Fn(&Point) -> f64> Objective for FnObjective<F> {
    fn dim(&self) -> usize {
        self.dim
    }

    fn value(&self, point: &Point) -> OptResult<Cost> {
        Ok((self.func)(point))
    }
}

fn as_args(point: &Point) -> Cow<'_, [f64]> {
    match point.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(point.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use crate::symbolic::SymbolicError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Value and analytic gradient of a symbolic objective.
    // - Symbolic setup errors surfacing as `OptError::Symbolic`.
    // - Closure objectives reporting their dimension and value.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the compiled value and gradient agree with hand-computed ones.
    //
    // Given
    // -----
    // - f(x, y) = (x - 1)^2 + 2*(y + 3)^2 at (0, 0).
    //
    // Expect
    // ------
    // - f = 19, ∇f = [-2, 12].
    fn symbolic_objective_value_and_gradient() {
        // Arrange
        let obj = SymbolicObjective::new("(x - 1)^2 + 2*(y + 3)^2", &["x", "y"]).expect("compile");
        let p = array![0.0, 0.0];

        // Act
        let value = obj.value(&p).expect("value");
        let grad = obj.grad(&p).expect("grad");

        // Assert
        assert_eq!(obj.dim(), 2);
        assert_abs_diff_eq!(value, 19.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grad[0], -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grad[1], 12.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a variable list that misses a free symbol is rejected.
    //
    // Given
    // -----
    // - "x + z" compiled over ["x"].
    //
    // Expect
    // ------
    // - OptError::Symbolic(UnboundSymbol { name: "z" }).
    fn unbound_symbol_is_reported() {
        let result = SymbolicObjective::new("x + z", &["x"]);
        assert_eq!(
            result.err(),
            Some(OptError::Symbolic(SymbolicError::UnboundSymbol { name: "z".to_string() }))
        );
    }

    #[test]
    // Purpose
    // -------
    // Check closure objectives have no analytic gradient.
    //
    // Given
    // -----
    // - f(p) = p·p in dimension 3.
    //
    // Expect
    // ------
    // - value([1, 2, 3]) = 14; grad returns GradientNotImplemented.
    fn closure_objective_defers_gradient() {
        let obj = FnObjective::new(3, |p: &Point| p.dot(p));
        let p = array![1.0, 2.0, 3.0];

        assert_eq!(obj.dim(), 3);
        assert_eq!(obj.value(&p), Ok(14.0));
        assert_eq!(obj.grad(&p), Err(OptError::GradientNotImplemented));
    }
}
