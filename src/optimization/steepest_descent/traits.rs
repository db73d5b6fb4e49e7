//! Public API surface for steepest-descent minimization.
//!
//! - [`Objective`]: trait users implement for their function.
//! - [`StopCriterion`] and [`StepType`]: string-keyed choices, parsed once.
//! - [`StepRule`]: the resolved step-size strategy.
//! - [`SDOptions`]: validated configuration for the minimizer.
//! - [`SDOutcome`]: normalized result returned by `steepest_descent`.
//!
//! Convention: the minimizer always *minimizes* `f(p)`. If an analytic
//! gradient is provided it must be `∇f(p)`; otherwise finite differences
//! are used.
use std::fmt;
use std::str::FromStr;

use argmin::core::TerminationReason;
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    errors::{OptError, OptResult},
    steepest_descent::{
        types::{
            Cost, DEFAULT_ERR, DEFAULT_FIXED_STEP, DEFAULT_LINE_SEARCH_BOUNDS, DEFAULT_MAX_ITER,
            Grad, Point, Trajectory,
        },
        validation::{verify_bounds, verify_err, verify_max_iter, verify_step},
    },
};

/// User-implemented objective interface.
///
/// Required:
/// - `dim()`: number of variables; every point passed in has this length.
/// - `value(&Point) -> OptResult<Cost>`: evaluate `f(p)`.
///
/// Optional:
/// - `grad(&Point) -> OptResult<Grad>`: analytic gradient `∇f(p)`.
///   If not implemented, finite differences are used automatically.
pub trait Objective {
    fn dim(&self) -> usize;
    fn value(&self, point: &Point) -> OptResult<Cost>;

    fn grad(&self, _point: &Point) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Rule deciding when the descent loop stops.
///
/// Variants:
/// - `ScaledDiff`: `|f(new) − f(prev)| / max(1, |f(prev)|) < err`.
/// - `Gradient`: `‖∇f(new)‖ < err`.
/// - `AbsDiff`: `|f(new) − f(prev)| < err`.
///
/// Parsing:
/// Accepts `"sc_diff"`, `"gradient"`, `"abs_diff"` (case-insensitive).
/// Unknown names return `OptError::InvalidStopCriteria`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopCriterion {
    #[default]
    ScaledDiff,
    Gradient,
    AbsDiff,
}

impl StopCriterion {
    pub fn name(self) -> &'static str {
        match self {
            StopCriterion::ScaledDiff => "sc_diff",
            StopCriterion::Gradient => "gradient",
            StopCriterion::AbsDiff => "abs_diff",
        }
    }
}

impl FromStr for StopCriterion {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sc_diff" => Ok(StopCriterion::ScaledDiff),
            "gradient" => Ok(StopCriterion::Gradient),
            "abs_diff" => Ok(StopCriterion::AbsDiff),
            _ => Err(OptError::InvalidStopCriteria {
                name: s.to_string(),
                reason: "Valid options are 'sc_diff', 'gradient' or 'abs_diff'.",
            }),
        }
    }
}

impl fmt::Display for StopCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the step size is chosen each iteration.
///
/// Parsing:
/// Accepts `"opt"` (line search) and `"fix"` (constant), case-insensitive.
/// Unknown names return `OptError::InvalidStepType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepType {
    #[default]
    Optimal,
    Fixed,
}

impl FromStr for StepType {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opt" => Ok(StepType::Optimal),
            "fix" => Ok(StepType::Fixed),
            _ => Err(OptError::InvalidStepType {
                name: s.to_string(),
                reason: "Valid options are 'opt' or 'fix'.",
            }),
        }
    }
}

/// Resolved step-size strategy.
///
/// - `Optimal { bounds }`: minimize `φ(α) = f(p − α∇f(p))` over
///   `α ∈ [bounds.0, bounds.1]` with a bounded Brent search.
/// - `Fixed { step }`: use `α = step` every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepRule {
    Optimal { bounds: (f64, f64) },
    Fixed { step: f64 },
}

impl StepRule {
    /// Build a rule from a parsed [`StepType`].
    ///
    /// `step` is only consulted for [`StepType::Fixed`]; it defaults to
    /// [`DEFAULT_FIXED_STEP`] when `None`.
    ///
    /// # Errors
    /// - [`OptError::InvalidStep`] for a non-positive or non-finite step.
    pub fn new(step_type: StepType, step: Option<f64>) -> OptResult<Self> {
        match step_type {
            StepType::Optimal => Ok(StepRule::Optimal { bounds: DEFAULT_LINE_SEARCH_BOUNDS }),
            StepType::Fixed => StepRule::fixed(step.unwrap_or(DEFAULT_FIXED_STEP)),
        }
    }

    /// Line-search rule over a custom interval.
    ///
    /// # Errors
    /// - [`OptError::InvalidLineSearchBounds`] unless `0 <= lower < upper`.
    pub fn optimal_within(lower: f64, upper: f64) -> OptResult<Self> {
        verify_bounds(lower, upper)?;
        Ok(StepRule::Optimal { bounds: (lower, upper) })
    }

    /// Constant-step rule.
    ///
    /// # Errors
    /// - [`OptError::InvalidStep`] for a non-positive or non-finite step.
    pub fn fixed(step: f64) -> OptResult<Self> {
        verify_step(step)?;
        Ok(StepRule::Fixed { step })
    }
}

impl Default for StepRule {
    fn default() -> Self {
        StepRule::Optimal { bounds: DEFAULT_LINE_SEARCH_BOUNDS }
    }
}

/// Minimizer configuration.
///
/// Fields:
/// - `err` — target tolerance for the stopping criterion.
/// - `max_iter` — hard cap on iterations; always enforced.
/// - `stop_criterion` — see [`StopCriterion`].
/// - `step_rule` — see [`StepRule`].
/// - `full_output` — if `true`, the outcome carries the trajectory.
/// - `verbose` — if `true` and the `obs_slog` feature is enabled, progress
///   is reported on stderr and the line search attaches a slog observer.
///
/// Default:
/// - `err = 1e-3`, `max_iter = 1000`, `sc_diff`, line search on `[0, 10]`,
///   `full_output = false`, `verbose = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct SDOptions {
    pub err: f64,
    pub max_iter: usize,
    pub stop_criterion: StopCriterion,
    pub step_rule: StepRule,
    pub full_output: bool,
    pub verbose: bool,
}

impl SDOptions {
    /// Create validated options from already-resolved choices.
    ///
    /// # Errors
    /// - [`OptError::InvalidErr`], [`OptError::InvalidMaxIter`].
    /// - Step errors when `step_rule` was built by hand with invalid values.
    pub fn new(
        err: f64, max_iter: usize, stop_criterion: StopCriterion, step_rule: StepRule,
        full_output: bool,
    ) -> OptResult<Self> {
        let opts = Self { err, max_iter, stop_criterion, step_rule, full_output, verbose: false };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check the numeric settings. Fields are public, so the minimizer
    /// calls this before running.
    pub fn validate(&self) -> OptResult<()> {
        verify_err(self.err)?;
        verify_max_iter(self.max_iter)?;
        match self.step_rule {
            StepRule::Optimal { bounds } => verify_bounds(bounds.0, bounds.1),
            StepRule::Fixed { step } => verify_step(step),
        }
    }

    /// Create validated options from the string-keyed surface
    /// (`stop_criteria = "sc_diff" | "gradient" | "abs_diff"`,
    /// `step_type = "opt" | "fix"`).
    ///
    /// Both names are parsed before any numeric value is inspected, so an
    /// unrecognised name is always the reported error.
    pub fn from_names(
        err: f64, max_iter: usize, stop_criteria: &str, step_type: &str, step: Option<f64>,
        full_output: bool,
    ) -> OptResult<Self> {
        let stop_criterion: StopCriterion = stop_criteria.parse()?;
        let step_type: StepType = step_type.parse()?;
        let step_rule = StepRule::new(step_type, step)?;
        Self::new(err, max_iter, stop_criterion, step_rule, full_output)
    }

    /// Toggle progress reporting.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for SDOptions {
    fn default() -> Self {
        Self {
            err: DEFAULT_ERR,
            max_iter: DEFAULT_MAX_ITER,
            stop_criterion: StopCriterion::default(),
            step_rule: StepRule::default(),
            full_output: false,
            verbose: false,
        }
    }
}

/// Canonical result returned by `steepest_descent`.
///
/// - `point`: last point reached.
/// - `value`: `f(point)`.
/// - `grad_norm`: `‖∇f(point)‖`.
/// - `iterations`: number of descent steps taken.
/// - `converged`: `true` if the stopping criterion fired before the cap.
/// - `status`: human-readable termination reason.
/// - `trajectory`: visited points (row 0 is the start) when
///   `full_output` was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct SDOutcome {
    pub point: Point,
    pub value: f64,
    pub grad_norm: f64,
    pub iterations: usize,
    pub converged: bool,
    pub status: String,
    pub trajectory: Option<Trajectory>,
}

impl SDOutcome {
    /// Build an outcome from the final loop state.
    pub fn new(
        point: Point, value: f64, grad: &Grad, iterations: usize, reason: TerminationReason,
        trajectory: Option<Trajectory>,
    ) -> Self {
        let converged = matches!(reason, TerminationReason::SolverConverged);
        let status = format!("{reason:?}");
        let grad_norm = grad.l2_norm();
        Self { point, value, grad_norm, iterations, converged, status, trajectory }
    }
}
