//! symbolic::program — compile an [`Expr`] into a positional numeric callable.
//!
//! Purpose
//! -------
//! Turn an expression tree plus an ordered variable list into a flat
//! postfix program whose evaluation touches no strings and allocates
//! one stack sized at compile time. This is the numeric half of the
//! "expression → callable" service used by the minimizer.
//!
//! A [`Program`] holds no mutable state, so it is `Send + Sync` and may be
//! evaluated concurrently.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every symbol of the expression resolves to a slot in the variable
//!   list at compile time; evaluation never fails on lookup.
//! - `eval` checks the argument count once and otherwise follows IEEE
//!   semantics (`ln(-1)` is `NaN`, `1/0` is `inf`).
use crate::symbolic::{
    errors::{SymResult, SymbolicError},
    expr::{Expr, Func},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Instr {
    Const(f64),
    Load(usize),
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Call(Func),
}

/// Compiled postfix program over positional arguments.
#[derive(Debug, Clone)]
pub struct Program {
    code: Vec<Instr>,
    arity: usize,
    depth: usize,
}

impl Program {
    /// Compile `expr` so that argument `i` feeds symbol `vars[i]`.
    ///
    /// # Errors
    /// - [`SymbolicError::UnboundSymbol`] if `expr` uses a symbol missing
    ///   from `vars`.
    pub fn compile<S: AsRef<str>>(expr: &Expr, vars: &[S]) -> SymResult<Program> {
        let mut code = Vec::new();
        emit(expr, vars, &mut code)?;
        let depth = max_depth(&code);
        Ok(Program { code, arity: vars.len(), depth })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Largest number of operands live on the stack during `eval`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluate the program at `args`.
    ///
    /// # Errors
    /// - [`SymbolicError::ArityMismatch`] if `args.len() != self.arity()`.
    pub fn eval(&self, args: &[f64]) -> SymResult<f64> {
        if args.len() != self.arity {
            return Err(SymbolicError::ArityMismatch { expected: self.arity, found: args.len() });
        }
        let mut stack = Vec::with_capacity(self.depth);
        for instr in &self.code {
            match *instr {
                Instr::Const(c) => stack.push(c),
                Instr::Load(slot) => stack.push(args[slot]),
                Instr::Neg => {
                    let a = pop(&mut stack);
                    stack.push(-a);
                }
                Instr::Call(func) => {
                    let a = pop(&mut stack);
                    stack.push(func.apply(a));
                }
                Instr::Add | Instr::Sub | Instr::Mul | Instr::Div | Instr::Pow => {
                    let b = pop(&mut stack);
                    let a = pop(&mut stack);
                    stack.push(match *instr {
                        Instr::Add => a + b,
                        Instr::Sub => a - b,
                        Instr::Mul => a * b,
                        Instr::Div => a / b,
                        _ => pow(a, b),
                    });
                }
            }
        }
        Ok(pop(&mut stack))
    }
}

fn max_depth(code: &[Instr]) -> usize {
    let mut live = 0usize;
    let mut peak = 0usize;
    for instr in code {
        match instr {
            Instr::Const(_) | Instr::Load(_) => live += 1,
            Instr::Neg | Instr::Call(_) => {}
            Instr::Add | Instr::Sub | Instr::Mul | Instr::Div | Instr::Pow => {
                live = live.saturating_sub(1)
            }
        }
        peak = peak.max(live);
    }
    peak
}

// Compilation emits balanced code, so the stack is never empty here.
#[inline]
fn pop(stack: &mut Vec<f64>) -> f64 {
    stack.pop().unwrap_or(f64::NAN)
}

/// Integer exponents go through `powi` so negative bases stay real.
#[inline]
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

fn emit<S: AsRef<str>>(expr: &Expr, vars: &[S], code: &mut Vec<Instr>) -> SymResult<()> {
    match expr {
        Expr::Num(c) => code.push(Instr::Const(*c)),
        Expr::Sym(name) => {
            let slot = vars
                .iter()
                .position(|v| v.as_ref() == name)
                .ok_or_else(|| SymbolicError::UnboundSymbol { name: name.clone() })?;
            code.push(Instr::Load(slot));
        }
        Expr::Neg(a) => {
            emit(a, vars, code)?;
            code.push(Instr::Neg);
        }
        Expr::Call(func, a) => {
            emit(a, vars, code)?;
            code.push(Instr::Call(*func));
        }
        Expr::Add(a, b)
        | Expr::Sub(a, b)
        | Expr::Mul(a, b)
        | Expr::Div(a, b)
        | Expr::Pow(a, b) => {
            emit(a, vars, code)?;
            emit(b, vars, code)?;
            code.push(match expr {
                Expr::Add(..) => Instr::Add,
                Expr::Sub(..) => Instr::Sub,
                Expr::Mul(..) => Instr::Mul,
                Expr::Div(..) => Instr::Div,
                _ => Instr::Pow,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parser::parse;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Positional binding of arguments to variables.
    // - Arithmetic, power and function evaluation.
    // - Unbound-symbol and arity errors.
    //
    // They intentionally DO NOT cover:
    // - Gradient programs (see `compiled`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that argument order follows the variable list, not the order
    // in which symbols appear in the source.
    //
    // Given
    // -----
    // - "y - x" compiled against ["x", "y"].
    //
    // Expect
    // ------
    // - eval([1, 5]) == 4.
    fn arguments_bind_in_variable_order() {
        // Arrange
        let expr = parse("y - x").expect("should parse");
        let program = Program::compile(&expr, &["x", "y"]).expect("should compile");

        // Act
        let value = program.eval(&[1.0, 5.0]).expect("should evaluate");

        // Assert
        assert_eq!(value, 4.0);
    }

    #[test]
    // Purpose
    // -------
    // Check evaluation of powers (including negative bases) and calls.
    //
    // Given
    // -----
    // - "x^3 + sqrt(y) * cos(0)" at (x, y) = (-2, 9).
    //
    // Expect
    // ------
    // - -8 + 3 = -5.
    fn evaluates_powers_of_negative_bases_and_functions() {
        // Arrange
        let expr = parse("x^3 + sqrt(y) * cos(0)").expect("should parse");
        let program = Program::compile(&expr, &["x", "y"]).expect("should compile");

        // Act
        let value = program.eval(&[-2.0, 9.0]).expect("should evaluate");

        // Assert
        assert_relative_eq!(value, -5.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure compile and eval reject mismatched bindings.
    //
    // Given
    // -----
    // - "x + z" against ["x", "y"]; "x" evaluated with two arguments.
    //
    // Expect
    // ------
    // - UnboundSymbol("z"); ArityMismatch { expected: 1, found: 2 }.
    fn rejects_unbound_symbols_and_wrong_arity() {
        // Arrange
        let unbound = parse("x + z").expect("should parse");
        let single = Program::compile(&Expr::sym("x"), &["x"]).expect("should compile");

        // Act / Assert
        assert_eq!(
            Program::compile(&unbound, &["x", "y"]).unwrap_err(),
            SymbolicError::UnboundSymbol { name: "z".to_string() }
        );
        assert_eq!(
            single.eval(&[1.0, 2.0]),
            Err(SymbolicError::ArityMismatch { expected: 1, found: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the compile-time stack depth and that one program can be
    // shared across threads.
    //
    // Given
    // -----
    // - "x*y + (x - y)^2", whose postfix form peaks at three operands.
    // - Four threads evaluating the same program at different points.
    //
    // Expect
    // ------
    // - depth() == 3.
    // - Each thread sees its own value: x*y + (x - y)^2 at (k, 1).
    fn shared_program_evaluates_concurrently() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}

        // Arrange
        let expr = parse("x*y + (x - y)^2").expect("should parse");
        let program = Program::compile(&expr, &["x", "y"]).expect("should compile");
        assert_send_sync(&program);

        // Act
        let values: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|k| {
                    let program = &program;
                    scope.spawn(move || program.eval(&[k as f64, 1.0]).expect("should evaluate"))
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("thread")).collect()
        });

        // Assert
        assert_eq!(program.depth(), 3);
        for (k, value) in values.iter().enumerate() {
            let x = k as f64;
            assert_relative_eq!(*value, x + (x - 1.0).powi(2), epsilon = 1e-12);
        }
    }
}
