//! symbolic::errors — error surface for parsing, differentiation and compilation.
//!
//! Purpose
//! -------
//! Collect every failure the expression service can report into a single
//! enum, [`SymbolicError`], with a matching result alias [`SymResult`].
//!
//! Conventions
//! -----------
//! - Parse errors carry the byte offset into the source string.
//! - Binding errors (empty/duplicate/unbound variables) are raised when an
//!   expression is compiled against a variable list, never during parsing.
//! - Arity errors are raised when a compiled program is called with the
//!   wrong number of positional arguments.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for the expression service.
pub type SymResult<T> = Result<T, SymbolicError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    // ---- Parsing ----
    /// A character that does not start any token.
    UnexpectedChar { ch: char, pos: usize },
    /// A well-formed token in a position the grammar does not allow.
    UnexpectedToken { token: String, pos: usize },
    /// Input ended while an operand or closing parenthesis was expected.
    UnexpectedEnd,
    /// A numeric literal that `f64` parsing rejects.
    InvalidNumber { text: String, pos: usize },
    /// Function call to a name outside the supported set.
    UnknownFunction { name: String },
    /// Nesting or operator chains deeper than the parser accepts.
    TooDeep { limit: usize, pos: usize },

    // ---- Binding ----
    /// Variable list is empty.
    EmptyVariables,
    /// Variable list names the same symbol twice.
    DuplicateVariable { name: String },
    /// Expression uses a symbol that is not in the variable list.
    UnboundSymbol { name: String },

    // ---- Evaluation ----
    /// Number of arguments differs from the number of bound variables.
    ArityMismatch { expected: usize, found: usize },
}

impl std::error::Error for SymbolicError {}

impl std::fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolicError::UnexpectedChar { ch, pos } => {
                write!(f, "Unexpected character '{ch}' at position {pos}")
            }
            SymbolicError::UnexpectedToken { token, pos } => {
                write!(f, "Unexpected token '{token}' at position {pos}")
            }
            SymbolicError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            SymbolicError::InvalidNumber { text, pos } => {
                write!(f, "Invalid numeric literal '{text}' at position {pos}")
            }
            SymbolicError::UnknownFunction { name } => {
                write!(f, "Unknown function '{name}'")
            }
            SymbolicError::TooDeep { limit, pos } => {
                write!(f, "Expression nests deeper than {limit} levels at position {pos}")
            }
            SymbolicError::EmptyVariables => write!(f, "Variable list must not be empty"),
            SymbolicError::DuplicateVariable { name } => {
                write!(f, "Variable '{name}' appears more than once in the variable list")
            }
            SymbolicError::UnboundSymbol { name } => {
                write!(
                    f,
                    "Symbol '{name}' is used in the expression but not declared as a variable"
                )
            }
            SymbolicError::ArityMismatch { expected, found } => {
                write!(f, "Argument count mismatch: expected {expected}, found {found}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SymbolicError> for PyErr {
    fn from(err: SymbolicError) -> PyErr {
        PyValueError::new_err(format!("SymbolicError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting of positional and binding errors.
    //
    // They intentionally DO NOT cover:
    // - The `From<SymbolicError> for PyErr` conversion, which needs the
    //   Python C API and belongs in Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that positional parse errors report both the offending
    // character and its offset.
    //
    // Given
    // -----
    // - `SymbolicError::UnexpectedChar { ch: '$', pos: 4 }`.
    //
    // Expect
    // ------
    // - The message contains "$" and "4".
    fn unexpected_char_reports_character_and_position() {
        // Arrange
        let err = SymbolicError::UnexpectedChar { ch: '$', pos: 4 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('$') && msg.contains('4'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure binding errors name the symbol that failed to bind.
    //
    // Given
    // -----
    // - `SymbolicError::UnboundSymbol { name: "z" }`.
    //
    // Expect
    // ------
    // - The message contains "'z'".
    fn unbound_symbol_names_the_symbol() {
        // Arrange
        let err = SymbolicError::UnboundSymbol { name: "z".to_string() };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("'z'"), "Got: {msg}");
    }
}
