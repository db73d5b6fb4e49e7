//! symbolic::compiled — objective + gradient compiled once over a variable list.
//!
//! Purpose
//! -------
//! Bundle a scalar expression, its symbolic gradient, and the compiled
//! programs for both, so that iterative solvers can evaluate `f(p)` and
//! `∇f(p)` repeatedly without touching the symbolic layer again.
//!
//! Key behaviors
//! -------------
//! - [`CompiledFunction::new`] validates the variable list (non-empty, no
//!   duplicates, covers every free symbol), differentiates once, and
//!   compiles `1 + n` programs.
//! - [`CompiledFunction::value`] / [`CompiledFunction::gradient`] evaluate
//!   at a positional point.
//!
//! Invariants & assumptions
//! ------------------------
//! - `variables().len() == dim()` and every gradient program has arity
//!   `dim()`.
//! - Variables that do not occur in the expression are allowed; their
//!   partial derivative is the constant zero.
use std::collections::HashSet;

use crate::symbolic::{
    errors::{SymResult, SymbolicError},
    expr::Expr,
    parser::parse,
    program::Program,
};

#[derive(Debug, Clone)]
pub struct CompiledFunction {
    expr: Expr,
    gradient_exprs: Vec<Expr>,
    variables: Vec<String>,
    value_program: Program,
    gradient_programs: Vec<Program>,
}

impl CompiledFunction {
    /// Differentiate and compile `expr` over `vars`.
    ///
    /// # Errors
    /// - [`SymbolicError::EmptyVariables`] if `vars` is empty.
    /// - [`SymbolicError::DuplicateVariable`] if a name repeats.
    /// - [`SymbolicError::UnboundSymbol`] if `expr` uses a symbol outside `vars`.
    pub fn new<S: AsRef<str>>(expr: Expr, vars: &[S]) -> SymResult<Self> {
        let variables = validate_variables(vars)?;
        if let Some(name) = expr.free_symbols().into_iter().find(|s| !variables.contains(s)) {
            return Err(SymbolicError::UnboundSymbol { name });
        }
        let gradient_exprs = expr.gradient(&variables);
        let value_program = Program::compile(&expr, &variables)?;
        let gradient_programs = gradient_exprs
            .iter()
            .map(|g| Program::compile(g, &variables))
            .collect::<SymResult<Vec<_>>>()?;
        Ok(Self { expr, gradient_exprs, variables, value_program, gradient_programs })
    }

    /// Parse `source`, then behave as [`CompiledFunction::new`].
    pub fn from_source<S: AsRef<str>>(source: &str, vars: &[S]) -> SymResult<Self> {
        Self::new(parse(source)?, vars)
    }

    pub fn dim(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn gradient_exprs(&self) -> &[Expr] {
        &self.gradient_exprs
    }

    pub fn value(&self, args: &[f64]) -> SymResult<f64> {
        self.value_program.eval(args)
    }

    pub fn gradient(&self, args: &[f64]) -> SymResult<Vec<f64>> {
        self.gradient_programs.iter().map(|p| p.eval(args)).collect()
    }
}

fn validate_variables<S: AsRef<str>>(vars: &[S]) -> SymResult<Vec<String>> {
    if vars.is_empty() {
        return Err(SymbolicError::EmptyVariables);
    }
    let mut seen = HashSet::with_capacity(vars.len());
    let mut out = Vec::with_capacity(vars.len());
    for v in vars {
        let name = v.as_ref().to_string();
        if !seen.insert(name.clone()) {
            return Err(SymbolicError::DuplicateVariable { name });
        }
        out.push(name);
    }
    Ok(out)
}
