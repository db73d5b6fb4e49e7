//! steepest_descent::finite_diff — finite-difference gradients with error capture.
//!
//! Purpose
//! -------
//! Approximate `∇f(p)` for objectives that do not provide an analytic
//! gradient, while keeping objective errors visible. The `finitediff`
//! closures must return plain `f64`, so evaluation errors are parked in a
//! shared cell and surfaced after differencing.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences when the central result fails validation.
//! - Any error raised by the objective during differencing is returned as
//!   is; it is never masked by the fallback.
//! - [`fd_gradient_unchecked`] skips validation so non-finite iterates can
//!   be carried through the descent loop.
use std::cell::RefCell;

use finitediff::FiniteDiff;

use crate::optimization::{
    errors::{OptError, OptResult},
    steepest_descent::{
        types::{Grad, Point},
        validation::validate_grad,
    },
};

/// Finite-difference gradient of `func` at `point`.
///
/// `func` returns `OptResult<f64>`; the first error it raises aborts the
/// computation and is returned.
///
/// # Errors
/// - Any error from `func`.
/// - [`OptError::GradientDimMismatch`] / [`OptError::InvalidGradient`] when
///   both difference schemes produce an invalid gradient.
pub fn fd_gradient<G: Fn(&Point) -> OptResult<f64>>(point: &Point, func: &G) -> OptResult<Grad> {
    let dim = point.len();
    let central = difference(point, func, Scheme::Central)?;
    if validate_grad(&central, dim).is_ok() {
        return Ok(central);
    }
    let forward = difference(point, func, Scheme::Forward)?;
    validate_grad(&forward, dim)?;
    Ok(forward)
}

/// Central-difference gradient with no finiteness check on the result.
///
/// Used at iterates that may have overflowed, where `inf`/`NaN` entries are
/// carried forward instead of aborting the run.
///
/// # Errors
/// - Any error from `func`.
pub fn fd_gradient_unchecked<G: Fn(&Point) -> OptResult<f64>>(
    point: &Point, func: &G,
) -> OptResult<Grad> {
    difference(point, func, Scheme::Central)
}

#[derive(Clone, Copy)]
enum Scheme {
    Central,
    Forward,
}

fn difference<G: Fn(&Point) -> OptResult<f64>>(
    point: &Point, func: &G, scheme: Scheme,
) -> OptResult<Grad> {
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let scalar = |p: &Point| -> f64 {
        match func(p) {
            Ok(value) => value,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            }
        }
    };
    let grad = match scheme {
        Scheme::Central => point.central_diff(&scalar),
        Scheme::Forward => point.forward_diff(&scalar),
    };
    match closure_err.into_inner() {
        Some(err) => Err(err),
        None => Ok(grad),
    }
}
