//! Error kinds shared by the lexer, parser and evaluator.
//!
//! Every error is fatal: the driver prints a single `Evaluation error:`
//! line and the process exits with a non-zero status.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed token or unbalanced parentheses.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Structurally wrong special form: bad bindings list, duplicate
    /// binder, missing body, empty application.
    #[error("bad form: {0}")]
    BadForm(String),

    /// Wrong number of arguments to a primitive, closure or special form.
    #[error("{name}: expected {expected} argument(s), got {actual}")]
    Arity {
        name: String,
        expected: String,
        actual: usize,
    },

    /// An operator received an argument of an unsupported kind.
    #[error("type error: {0}")]
    Type(String),

    /// A name could not be resolved in any frame. Also raised when a
    /// `letrec` binding is read before its value is computed.
    #[error("unbound symbol: {0}")]
    UnboundSymbol(String),

    /// The head of an application evaluated to a non-operator value.
    #[error("not applicable: {0}")]
    NotApplicable(String),
}

impl Error {
    pub fn arity(name: &str, expected: impl Into<String>, actual: usize) -> Self {
        Error::Arity {
            name: name.to_string(),
            expected: expected.into(),
            actual,
        }
    }
}
