//! symbolic::expr — expression trees, symbolic differentiation, printing.
//!
//! Purpose
//! -------
//! Represent a scalar formula over named symbols and derive its partial
//! derivatives symbolically, so that the gradient of an objective can be
//! produced once and then compiled into numeric programs.
//!
//! Key behaviors
//! -------------
//! - [`Expr`] is an immutable tree; every transformation returns a new tree.
//! - The smart constructors ([`Expr::add`], [`Expr::mul`], ...) apply light
//!   simplification: constant folding and the `0`/`1` identities. This keeps
//!   derivative trees small without attempting full canonicalisation.
//! - [`Expr::diff`] implements the sum, product, quotient, power and chain
//!   rules for the supported unary functions ([`Func`]).
//! - `Display` prints with minimal parentheses in a syntax that
//!   [`crate::symbolic::parse`] accepts back.
//!
//! Conventions
//! -----------
//! - Power is printed as `^`; unary minus binds looser than power, so
//!   `-x^2` means `-(x^2)`.
//! - Constant folding of function calls only happens when the folded value
//!   is finite; `ln(0)` stays symbolic.

use std::collections::BTreeSet;
use std::fmt;

use crate::symbolic::errors::{SymResult, SymbolicError};

/// Supported unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
}

impl Func {
    /// Resolve a function name. `log` is accepted as the natural logarithm.
    pub fn from_name(name: &str) -> SymResult<Func> {
        match name {
            "sin" => Ok(Func::Sin),
            "cos" => Ok(Func::Cos),
            "tan" => Ok(Func::Tan),
            "exp" => Ok(Func::Exp),
            "ln" | "log" => Ok(Func::Ln),
            "sqrt" => Ok(Func::Sqrt),
            _ => Err(SymbolicError::UnknownFunction { name: name.to_string() }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sqrt => "sqrt",
        }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Exp => x.exp(),
            Func::Ln => x.ln(),
            Func::Sqrt => x.sqrt(),
        }
    }
}

/// Scalar expression tree over named symbols.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Sym(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    // ---- Smart constructors ----

    pub fn num(value: f64) -> Expr {
        Expr::Num(value)
    }

    pub fn sym(name: impl Into<String>) -> Expr {
        Expr::Sym(name.into())
    }

    pub fn neg(a: Expr) -> Expr {
        match a {
            Expr::Num(c) => Expr::Num(-c),
            Expr::Neg(inner) => *inner,
            a => Expr::Neg(Box::new(a)),
        }
    }

    pub fn add(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Num(x), Expr::Num(y)) => Expr::Num(x + y),
            (a, b) if a.is_zero() => b,
            (a, b) if b.is_zero() => a,
            (a, Expr::Neg(b)) => Expr::sub(a, *b),
            (a, b) => Expr::Add(Box::new(a), Box::new(b)),
        }
    }

    pub fn sub(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Num(x), Expr::Num(y)) => Expr::Num(x - y),
            (a, b) if b.is_zero() => a,
            (a, b) if a.is_zero() => Expr::neg(b),
            (a, b) => Expr::Sub(Box::new(a), Box::new(b)),
        }
    }

    pub fn mul(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Num(x), Expr::Num(y)) => Expr::Num(x * y),
            (a, b) if a.is_zero() || b.is_zero() => Expr::Num(0.0),
            (a, b) if a.is_one() => b,
            (a, b) if b.is_one() => a,
            (Expr::Num(c), b) if c == -1.0 => Expr::neg(b),
            (a, Expr::Num(c)) if c == -1.0 => Expr::neg(a),
            // Keep numeric coefficients on the left.
            (a, Expr::Num(c)) => Expr::Mul(Box::new(Expr::Num(c)), Box::new(a)),
            (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
        }
    }

    pub fn div(a: Expr, b: Expr) -> Expr {
        match (a, b) {
            (Expr::Num(x), Expr::Num(y)) if y != 0.0 => Expr::Num(x / y),
            (a, _) if a.is_zero() => Expr::Num(0.0),
            (a, b) if b.is_one() => a,
            (a, b) => Expr::Div(Box::new(a), Box::new(b)),
        }
    }

    pub fn pow(base: Expr, exponent: Expr) -> Expr {
        match (base, exponent) {
            (Expr::Num(x), Expr::Num(y)) => Expr::Num(x.powf(y)),
            (_, e) if e.is_zero() => Expr::Num(1.0),
            (b, e) if e.is_one() => b,
            (b, e) => Expr::Pow(Box::new(b), Box::new(e)),
        }
    }

    pub fn call(func: Func, arg: Expr) -> Expr {
        if let Expr::Num(x) = arg {
            let folded = func.apply(x);
            if folded.is_finite() {
                return Expr::Num(folded);
            }
        }
        Expr::Call(func, Box::new(arg))
    }

    // ---- Queries ----

    fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(c) if *c == 0.0)
    }

    fn is_one(&self) -> bool {
        matches!(self, Expr::Num(c) if *c == 1.0)
    }

    /// Whether `var` occurs anywhere in the tree.
    pub fn depends_on(&self, var: &str) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Sym(name) => name == var,
            Expr::Neg(a) | Expr::Call(_, a) => a.depends_on(var),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => a.depends_on(var) || b.depends_on(var),
        }
    }

    /// Names of all symbols occurring in the tree, sorted.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Num(_) => {}
            Expr::Sym(name) => {
                out.insert(name.clone());
            }
            Expr::Neg(a) | Expr::Call(_, a) => a.collect_symbols(out),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }

    // ---- Differentiation ----

    /// Partial derivative with respect to `var`.
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Num(_) => Expr::Num(0.0),
            Expr::Sym(name) => Expr::Num(if name == var { 1.0 } else { 0.0 }),
            Expr::Neg(a) => Expr::neg(a.diff(var)),
            Expr::Add(a, b) => Expr::add(a.diff(var), b.diff(var)),
            Expr::Sub(a, b) => Expr::sub(a.diff(var), b.diff(var)),
            Expr::Mul(a, b) => Expr::add(
                Expr::mul(a.diff(var), (**b).clone()),
                Expr::mul((**a).clone(), b.diff(var)),
            ),
            Expr::Div(a, b) => Expr::div(
                Expr::sub(
                    Expr::mul(a.diff(var), (**b).clone()),
                    Expr::mul((**a).clone(), b.diff(var)),
                ),
                Expr::pow((**b).clone(), Expr::Num(2.0)),
            ),
            Expr::Pow(a, b) => diff_pow(a, b, var),
            Expr::Call(func, a) => {
                let a = (**a).clone();
                let inner = a.diff(var);
                let outer = match func {
                    Func::Sin => Expr::call(Func::Cos, a),
                    Func::Cos => Expr::neg(Expr::call(Func::Sin, a)),
                    Func::Tan => {
                        let cos_sq = Expr::pow(Expr::call(Func::Cos, a), Expr::Num(2.0));
                        Expr::div(Expr::Num(1.0), cos_sq)
                    }
                    Func::Exp => Expr::call(Func::Exp, a),
                    Func::Ln => Expr::div(Expr::Num(1.0), a),
                    Func::Sqrt => {
                        let twice_root = Expr::mul(Expr::Num(2.0), Expr::call(Func::Sqrt, a));
                        Expr::div(Expr::Num(1.0), twice_root)
                    }
                };
                Expr::mul(outer, inner)
            }
        }
    }

    /// Partial derivatives in the order of `vars`.
    pub fn gradient<S: AsRef<str>>(&self, vars: &[S]) -> Vec<Expr> {
        vars.iter().map(|v| self.diff(v.as_ref())).collect()
    }
}

fn diff_pow(base: &Expr, exponent: &Expr, var: &str) -> Expr {
    let base_dep = base.depends_on(var);
    let exp_dep = exponent.depends_on(var);
    match (base_dep, exp_dep) {
        (false, false) => Expr::Num(0.0),
        // d(u^c) = c * u^(c-1) * u'
        (true, false) => Expr::mul(
            Expr::mul(
                exponent.clone(),
                Expr::pow(base.clone(), Expr::sub(exponent.clone(), Expr::Num(1.0))),
            ),
            base.diff(var),
        ),
        // d(c^v) = c^v * ln(c) * v'
        (false, true) => Expr::mul(
            Expr::mul(
                Expr::pow(base.clone(), exponent.clone()),
                Expr::call(Func::Ln, base.clone()),
            ),
            exponent.diff(var),
        ),
        // d(u^v) = u^v * (v' ln u + v u' / u)
        (true, true) => Expr::mul(
            Expr::pow(base.clone(), exponent.clone()),
            Expr::add(
                Expr::mul(exponent.diff(var), Expr::call(Func::Ln, base.clone())),
                Expr::div(Expr::mul(exponent.clone(), base.diff(var)), base.clone()),
            ),
        ),
    }
}

// ---- Printing ----

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Num(c) if *c < 0.0 => PREC_NEG,
            Expr::Num(_) | Expr::Sym(_) | Expr::Call(..) => PREC_ATOM,
            Expr::Neg(_) => PREC_NEG,
            Expr::Add(..) | Expr::Sub(..) => PREC_ADD,
            Expr::Mul(..) | Expr::Div(..) => PREC_MUL,
            Expr::Pow(..) => PREC_POW,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(c) => write!(f, "{c}"),
            Expr::Sym(name) => write!(f, "{name}"),
            Expr::Neg(a) => {
                write!(f, "-")?;
                a.fmt_child(f, PREC_POW)
            }
            Expr::Add(a, b) => {
                a.fmt_child(f, PREC_ADD)?;
                write!(f, " + ")?;
                b.fmt_child(f, PREC_ADD)
            }
            Expr::Sub(a, b) => {
                a.fmt_child(f, PREC_ADD)?;
                write!(f, " - ")?;
                b.fmt_child(f, PREC_MUL)
            }
            Expr::Mul(a, b) => {
                a.fmt_child(f, PREC_MUL)?;
                write!(f, " * ")?;
                b.fmt_child(f, PREC_MUL)
            }
            Expr::Div(a, b) => {
                a.fmt_child(f, PREC_MUL)?;
                write!(f, " / ")?;
                b.fmt_child(f, PREC_POW)
            }
            Expr::Pow(a, b) => {
                a.fmt_child(f, PREC_ATOM)?;
                write!(f, "^")?;
                b.fmt_child(f, PREC_POW)
            }
            Expr::Call(func, a) => write!(f, "{}({a})", func.name()),
        }
    }
}
