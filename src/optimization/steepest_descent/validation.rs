//! Validation helpers for steepest-descent minimization.
//!
//! This module centralizes the consistency checks used across the
//! minimizer interface:
//!
//! - **Option checks**: [`verify_err`], [`verify_max_iter`], [`verify_step`],
//!   [`verify_bounds`] ensure numeric settings are finite and positive.
//! - **Start point**: [`validate_start`] enforces dimension and finiteness.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries; [`validate_grad_dim`] checks the dimension only.
//! - **Objective values**: [`validate_value`] checks for finiteness.
//!
//! Each helper reports a dedicated [`OptError`] variant carrying the
//! offending value.
use crate::optimization::{
    errors::{OptError, OptResult},
    steepest_descent::types::{Grad, Point},
};

/// Validate the stopping-criterion tolerance `err`.
///
/// # Errors
/// Returns [`OptError::InvalidErr`] if the value is non-finite or ≤ 0.0.
pub fn verify_err(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidErr { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidErr { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate a constant step size.
///
/// # Errors
/// Returns [`OptError::InvalidStep`] if the value is non-finite or ≤ 0.0.
pub fn verify_step(step: f64) -> OptResult<()> {
    if !step.is_finite() {
        return Err(OptError::InvalidStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(OptError::InvalidStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate the line-search interval `[lower, upper]`.
///
/// # Errors
/// Returns [`OptError::InvalidLineSearchBounds`] if either bound is
/// non-finite, the lower bound is negative, or `lower >= upper`.
pub fn verify_bounds(lower: f64, upper: f64) -> OptResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(OptError::InvalidLineSearchBounds {
            lower,
            upper,
            reason: "Bounds must be finite.",
        });
    }
    if lower < 0.0 {
        return Err(OptError::InvalidLineSearchBounds {
            lower,
            upper,
            reason: "Step sizes must be non-negative.",
        });
    }
    if lower >= upper {
        return Err(OptError::InvalidLineSearchBounds {
            lower,
            upper,
            reason: "Lower bound must be strictly below the upper bound.",
        });
    }
    Ok(())
}

/// Validate a start point against the objective dimension.
///
/// # Errors
/// - [`OptError::StartDimMismatch`] if `start.len() != dim`.
/// - [`OptError::InvalidStart`] for the first non-finite coordinate.
pub fn validate_start(start: &Point, dim: usize) -> OptResult<()> {
    if start.len() != dim {
        return Err(OptError::StartDimMismatch { expected: dim, found: start.len() });
    }
    for (index, &value) in start.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidStart {
                index,
                value,
                reason: "Start coordinates must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate only the length of a gradient vector.
///
/// # Errors
/// Returns [`OptError::GradientDimMismatch`] if length does not match `dim`.
pub fn validate_grad_dim(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    validate_grad_dim(grad, dim)?;
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
