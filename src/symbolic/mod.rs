//! symbolic — scalar expressions, symbolic gradients, compiled evaluation.
//!
//! Purpose
//! -------
//! Provide the differentiation/compilation service the minimizer relies on:
//! read a formula such as `"(x - 1)**2 + 3*y**2"`, differentiate it with
//! respect to an ordered list of variables, and compile both the formula
//! and its gradient into positional numeric callables.
//!
//! Key behaviors
//! -------------
//! - [`parse`] turns text into an [`Expr`] tree (`+ - * /`, `^`/`**`,
//!   `sin cos tan exp ln log sqrt`, the constant `pi`).
//! - [`Expr::diff`] / [`Expr::gradient`] differentiate symbolically with
//!   light simplification.
//! - [`Program`] is a postfix stack program bound to a variable order.
//! - [`CompiledFunction`] bundles the value program with one gradient
//!   program per variable.
//!
//! Invariants & assumptions
//! ------------------------
//! - Symbolic work (parse, diff, compile) happens once, up front; numeric
//!   evaluation never re-enters the symbolic layer.
//! - The variable list fixes argument order for every evaluation.
//!
//! Conventions
//! -----------
//! - All errors are [`SymbolicError`] via [`SymResult<T>`].
//! - The module does no I/O and no logging.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own concern; the
//!   optimization integration tests exercise the full parse → diff →
//!   compile → minimize path.

pub mod compiled;
pub mod errors;
pub mod expr;
pub mod parser;
pub mod program;

pub use self::compiled::CompiledFunction;
pub use self::errors::{SymResult, SymbolicError};
pub use self::expr::{Expr, Func};
pub use self::parser::parse;
pub use self::program::Program;
