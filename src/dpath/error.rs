//! Error types for path expression parsing.

use thiserror::Error;

/// Errors that can occur while parsing a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DpathError {
    /// Unexpected token at a specific position.
    #[error("Unexpected token '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    #[error("Invalid path syntax: {message}")]
    InvalidSyntax { message: String },
}
