//! Error types for SPDX expression parsing and validation.

use thiserror::Error;

use crate::expr::validate::Strictness;

/// Malformed expression text: bad character, unbalanced parentheses,
/// misplaced operator, or an empty expression.
///
/// `position` is a byte offset into the input; `lexeme` is the offending
/// token text (empty at end of input).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at offset {position}: {message}")]
pub struct SyntaxError {
    pub position: usize,
    pub lexeme: String,
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        SyntaxError {
            position,
            lexeme: lexeme.into(),
            message: message.into(),
        }
    }
}

/// Why the validator rejected an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownLicense,
    DeprecatedLicense,
    UnknownException,
    DeprecatedException,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::UnknownLicense => write!(f, "unknown license identifier"),
            RejectReason::DeprecatedLicense => write!(f, "deprecated license identifier"),
            RejectReason::UnknownException => write!(f, "unknown exception identifier"),
            RejectReason::DeprecatedException => write!(f, "deprecated exception identifier"),
        }
    }
}

/// Well-formed syntax, but an identifier violates the active strictness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} `{id}` rejected under {strictness:?}")]
pub struct ValidationError {
    /// The identifier that failed the catalog check, as written.
    pub id: String,
    pub reason: RejectReason,
    /// The policy that rejected the identifier.
    pub strictness: Strictness,
}

/// Either failure mode of [`Expr::parse`](crate::expr::Expr::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
