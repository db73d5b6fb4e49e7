//! symbolic::parser — text to [`Expr`].
//!
//! Grammar (lowest to highest binding):
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('-' | '+') unary | power
//! power := atom (('^' | '**') unary)?
//! atom  := number | ident | ident '(' expr ')' | '(' expr ')'
//! ```
//!
//! Power is right-associative and binds tighter than unary minus, so
//! `-x^2` parses as `-(x^2)` and `2^-1` as `2^(-1)`. The identifier `pi`
//! is read as the constant π.
use crate::symbolic::{
    errors::{SymResult, SymbolicError},
    expr::{Expr, Func},
};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(v) => v.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "^".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Parse an expression such as `"(x - 1)**2 + 3*sin(y)"`.
///
/// # Errors
/// - [`SymbolicError::UnexpectedChar`] / [`SymbolicError::InvalidNumber`]
///   for lexical problems.
/// - [`SymbolicError::UnexpectedToken`] / [`SymbolicError::UnexpectedEnd`]
///   for grammar violations, including trailing input.
/// - [`SymbolicError::UnknownFunction`] for calls outside [`Func`].
/// - [`SymbolicError::TooDeep`] when the tree or the parenthesis nesting
///   exceeds [`MAX_DEPTH`].
pub fn parse(source: &str) -> SymResult<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, cursor: 0, nesting: 0 };
    let (expr, _) = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some((token, pos)) => {
            Err(SymbolicError::UnexpectedToken { token: token.describe(), pos: *pos })
        }
    }
}

fn tokenize(source: &str) -> SymResult<Vec<(Token, usize)>> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (pos, ch) = chars[i];
        match ch {
            c if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push((Token::Plus, pos));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, pos));
                i += 1;
            }
            '*' => {
                if matches!(chars.get(i + 1), Some((_, '*'))) {
                    tokens.push((Token::Caret, pos));
                    i += 2;
                } else {
                    tokens.push((Token::Star, pos));
                    i += 1;
                }
            }
            '/' => {
                tokens.push((Token::Slash, pos));
                i += 1;
            }
            '^' => {
                tokens.push((Token::Caret, pos));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, pos));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, pos));
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                    i += 1;
                }
                // Exponent part: e.g. 1e-3, 2.5E+4.
                if i < chars.len() && matches!(chars[i].1, 'e' | 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && matches!(chars[j].1, '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].1.is_ascii_digit() {
                        while j < chars.len() && chars[j].1.is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| SymbolicError::InvalidNumber { text: text.clone(), pos })?;
                tokens.push((Token::Num(value), pos));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_alphanumeric() || chars[i].1 == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                tokens.push((Token::Ident(name), pos));
            }
            c => return Err(SymbolicError::UnexpectedChar { ch: c, pos }),
        }
    }
    Ok(tokens)
}

/// Deepest expression tree, or parenthesis/call nesting, that `parse` accepts.
pub const MAX_DEPTH: usize = 256;

/// A parsed subtree with the depth of its tree.
type Node = (Expr, usize);

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }

    fn eat(&mut self, expected: &Token) -> bool {
        match self.peek() {
            Some((token, _)) if token == expected => {
                self.cursor += 1;
                true
            }
            _ => false,
        }
    }

    /// Position of the most recently consumed token.
    fn last_pos(&self) -> usize {
        self.cursor.checked_sub(1).and_then(|i| self.tokens.get(i)).map_or(0, |(_, pos)| *pos)
    }

    fn deeper(&self, depth: usize) -> SymResult<usize> {
        let depth = depth + 1;
        if depth > MAX_DEPTH {
            return Err(SymbolicError::TooDeep { limit: MAX_DEPTH, pos: self.last_pos() });
        }
        Ok(depth)
    }

    fn nested<T>(&mut self, inner: impl FnOnce(&mut Self) -> SymResult<T>) -> SymResult<T> {
        if self.nesting >= MAX_DEPTH {
            return Err(SymbolicError::TooDeep { limit: MAX_DEPTH, pos: self.last_pos() });
        }
        self.nesting += 1;
        let result = inner(self);
        self.nesting -= 1;
        result
    }

    fn expr(&mut self) -> SymResult<Node> {
        let (mut lhs, mut depth) = self.term()?;
        loop {
            let build: fn(Expr, Expr) -> Expr = if self.eat(&Token::Plus) {
                Expr::add
            } else if self.eat(&Token::Minus) {
                Expr::sub
            } else {
                return Ok((lhs, depth));
            };
            let (rhs, rhs_depth) = self.term()?;
            depth = self.deeper(depth.max(rhs_depth))?;
            lhs = build(lhs, rhs);
        }
    }

    fn term(&mut self) -> SymResult<Node> {
        let (mut lhs, mut depth) = self.unary()?;
        loop {
            let build: fn(Expr, Expr) -> Expr = if self.eat(&Token::Star) {
                Expr::mul
            } else if self.eat(&Token::Slash) {
                Expr::div
            } else {
                return Ok((lhs, depth));
            };
            let (rhs, rhs_depth) = self.unary()?;
            depth = self.deeper(depth.max(rhs_depth))?;
            lhs = build(lhs, rhs);
        }
    }

    fn unary(&mut self) -> SymResult<Node> {
        if self.eat(&Token::Minus) {
            let (inner, depth) = self.nested(Self::unary)?;
            return Ok((Expr::neg(inner), self.deeper(depth)?));
        }
        if self.eat(&Token::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> SymResult<Node> {
        let (base, base_depth) = self.atom()?;
        if self.eat(&Token::Caret) {
            let (exponent, exp_depth) = self.nested(Self::unary)?;
            let depth = self.deeper(base_depth.max(exp_depth))?;
            return Ok((Expr::pow(base, exponent), depth));
        }
        Ok((base, base_depth))
    }

    fn atom(&mut self) -> SymResult<Node> {
        match self.next() {
            Some((Token::Num(value), _)) => Ok((Expr::num(value), 1)),
            Some((Token::Ident(name), _)) => {
                if self.eat(&Token::LParen) {
                    let func = Func::from_name(&name)?;
                    let (arg, depth) = self.nested(Self::expr)?;
                    self.expect_rparen()?;
                    Ok((Expr::call(func, arg), self.deeper(depth)?))
                } else if name == "pi" {
                    Ok((Expr::num(std::f64::consts::PI), 1))
                } else {
                    Ok((Expr::sym(name), 1))
                }
            }
            Some((Token::LParen, _)) => {
                let inner = self.nested(Self::expr)?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some((token, pos)) => {
                Err(SymbolicError::UnexpectedToken { token: token.describe(), pos })
            }
            None => Err(SymbolicError::UnexpectedEnd),
        }
    }

    fn expect_rparen(&mut self) -> SymResult<()> {
        match self.next() {
            Some((Token::RParen, _)) => Ok(()),
            Some((token, pos)) => {
                Err(SymbolicError::UnexpectedToken { token: token.describe(), pos })
            }
            None => Err(SymbolicError::UnexpectedEnd),
        }
    }
}
