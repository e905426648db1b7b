// ABOUTME: Error types for every phase of the reader/expander/evaluator pipeline

use crate::symbol::Symbol;
use thiserror::Error;

/// Raised by the tokenizer: an illegal character sequence in the input text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("illegal escape sequence '\\{0}' in string literal")]
    IllegalEscape(char),
}

/// Raised by the reader: tokens don't form a valid s-expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected ')'")]
    UnexpectedCloseParen,

    #[error("unexpected end of input inside a list")]
    UnexpectedEof,

    #[error("expected ')' after dotted tail")]
    ExpectedCloseParenAfterDot,

    #[error("unexpected end of input after quote prefix")]
    UnexpectedEofAfterQuote,
}

/// Raised by the expander: a form could not be desugared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("{context}: cannot destructure '{form}'")]
    Malformed { context: &'static str, form: String },

    #[error("macro '{name}' expansion must produce exactly one value, got {actual}")]
    MacroArity { name: String, actual: usize },
}

/// Raised by the evaluator: a form cannot be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("cannot call a dotted pair: '{0}'")]
    DottedApplication(String),

    #[error("define target must be a symbol, got '{0}'")]
    BadDefineTarget(String),

    #[error("quote takes exactly one argument, got '{0}'")]
    BadQuote(String),

    #[error("if takes 2 or 3 arguments, got '{0}'")]
    BadIf(String),

    #[error("lambda formals must be a symbol, nil, or a chain of symbols, got '{0}'")]
    BadFormals(String),

    #[error("value is not callable: '{0}'")]
    NotCallable(String),

    #[error("macro expansion did not produce exactly one value: '{0}'")]
    BadMacroResult(String),
}

/// Raised by environment lookup: a symbol has no binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unbound symbol: {0}")]
pub struct BindingError(pub Symbol);

/// Raised by a procedure call: the argument count doesn't match the formals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureError {
    pub procedure: String,
    pub expected: String,
    pub actual: usize,
}

impl std::fmt::Display for ProcedureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.expected == "1" { "" } else { "s" };
        write!(
            f,
            "{}: expected {} argument{}, got {}",
            self.procedure, self.expected, plural, self.actual
        )
    }
}

impl std::error::Error for ProcedureError {}

/// Raised by a builtin primitive: a bad argument type, count, or value that
/// isn't one of the pipeline-phase errors above. Not itself named by
/// spec.md's phase taxonomy, but every primitive needs somewhere to report a
/// domain failure — grounded in the teacher's `EvalError::{TypeMismatch,
/// ArityError, RuntimeError}` trio.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("{name}: expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{name}: expected {expected} argument(s), got {actual}")]
    Arity {
        name: String,
        expected: String,
        actual: usize,
    },

    #[error("{name}: {message}")]
    Domain { name: String, message: String },
}

impl PrimitiveError {
    pub fn type_mismatch(
        name: impl Into<String>,
        expected: &'static str,
        actual: &crate::value::Value,
    ) -> Self {
        PrimitiveError::TypeMismatch {
            name: name.into(),
            expected,
            actual: actual.type_name(),
        }
    }

    pub fn arity(name: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        PrimitiveError::Arity {
            name: name.into(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn domain(name: impl Into<String>, message: impl Into<String>) -> Self {
        PrimitiveError::Domain {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// The single error type returned by every public entry point in this crate.
///
/// Each pipeline phase (tokenizer, reader, expander, evaluator, environment,
/// procedure) raises its own typed error; they unify here via `#[from]` so
/// callers can propagate with a single `?`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActinideError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Procedure(#[from] ProcedureError),

    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}
