//! Stopping rules for the descent loop.
use argmin_math::ArgminL2Norm;

use crate::optimization::steepest_descent::{traits::StopCriterion, types::Grad};

impl StopCriterion {
    /// Quantity compared against `err` after a step from `prev` to `new`.
    ///
    /// - `ScaledDiff`: `|f_new − f_prev| / max(1, |f_prev|)`.
    /// - `Gradient`: `‖∇f(new)‖`.
    /// - `AbsDiff`: `|f_new − f_prev|`.
    pub fn criterion_value(self, f_prev: f64, f_new: f64, grad_new: &Grad) -> f64 {
        match self {
            StopCriterion::ScaledDiff => (f_new - f_prev).abs() / f_prev.abs().max(1.0),
            StopCriterion::Gradient => grad_new.l2_norm(),
            StopCriterion::AbsDiff => (f_new - f_prev).abs(),
        }
    }

    /// `true` once the criterion value drops strictly below `err`.
    ///
    /// A NaN criterion value never stops the loop.
    pub fn is_met(self, f_prev: f64, f_new: f64, grad_new: &Grad, err: f64) -> bool {
        self.criterion_value(f_prev, f_new, grad_new) < err
    }
}
