//! optimization::errors — unified error surface for the minimizer.
//!
//! Purpose
//! -------
//! Collect configuration mistakes, numerical failures, symbolic-layer
//! failures and backend (`argmin`) errors into a single enum,
//! [`OptError`], with the result alias [`OptResult<T>`].
//!
//! Key behaviors
//! -------------
//! - Option validation (`err`, `max_iter`, `step`, line-search bounds,
//!   string-keyed choices) reports dedicated variants carrying the
//!   offending value and a short reason.
//! - `From<argmin::core::Error>` first recovers an `OptError` that was
//!   tunnelled through argmin (e.g. raised inside a cost function), then
//!   maps argmin's own error kinds, and finally falls back to
//!   [`OptError::BackendError`].
//! - `From<SymbolicError>` wraps failures from the expression service.
//!
//! Conventions
//! -----------
//! - Callers never see raw `argmin` errors; public entry points return
//!   `OptResult<T>`.
use argmin::core::{ArgminError, Error};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::symbolic::SymbolicError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that finite differences should be used.
    GradientNotImplemented,

    /// Gradient dimensions do not match point dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- SDOptions ----
    /// Target error needs to be positive and finite.
    InvalidErr { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Unrecognised stopping-criterion name.
    InvalidStopCriteria { name: String, reason: &'static str },

    /// Unrecognised step-type name.
    InvalidStepType { name: String, reason: &'static str },

    /// Fixed step needs to be positive and finite.
    InvalidStep { step: f64, reason: &'static str },

    /// Line-search interval needs finite bounds with lower < upper.
    InvalidLineSearchBounds { lower: f64, upper: f64, reason: &'static str },

    // ---- Start point ----
    /// Start point length differs from the objective dimension.
    StartDimMismatch { expected: usize, found: usize },

    /// Start point coordinates need to be finite.
    InvalidStart { index: usize, value: f64, reason: &'static str },

    // ---- Cost function ----
    /// Objective returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Line search ----
    /// Line search finished without a best step size.
    MissingAlpha,

    // ---- Symbolic ----
    /// Wrapper for failures of the expression service.
    Symbolic(SymbolicError),

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- SDOptions ----
            OptError::InvalidErr { tol, reason } => {
                write!(f, "Invalid target error {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidStopCriteria { name, reason } => {
                write!(f, "Invalid stop criteria '{name}': {reason}")
            }
            OptError::InvalidStepType { name, reason } => {
                write!(f, "Invalid step type '{name}': {reason}")
            }
            OptError::InvalidStep { step, reason } => {
                write!(f, "Invalid fixed step {step}: {reason}")
            }
            OptError::InvalidLineSearchBounds { lower, upper, reason } => {
                write!(f, "Invalid line-search bounds [{lower}, {upper}]: {reason}")
            }

            // ---- Start point ----
            OptError::StartDimMismatch { expected, found } => {
                write!(f, "Start point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidStart { index, value, reason } => {
                write!(f, "Invalid start coordinate at index {index}: {value}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite objective value: {value}")
            }

            // ---- Line search ----
            OptError::MissingAlpha => {
                write!(f, "Line search returned no step size")
            }

            // ---- Symbolic ----
            OptError::Symbolic(err) => write!(f, "Symbolic error: {err}"),

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<SymbolicError> for OptError {
    fn from(err: SymbolicError) -> Self {
        OptError::Symbolic(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(format!("OptError: {err}"))
    }
}
