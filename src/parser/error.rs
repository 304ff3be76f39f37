//! Parse error types.

use crate::token::Span;

/// An error that occurred during parsing.
///
/// `ParseError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting.
///
/// # See Also
///
/// * [`crate::lexer::LexError`] - Similar error type for lexical errors
#[derive(Debug)]
pub struct ParseError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates an "unknown type name" error.
    pub(super) fn unknown_type(name: &str, span: Span) -> Self {
        ParseError {
            message: format!(
                "Unknown type: '{}'. Expected 'int', 'bool', 'long', or 'str'",
                name
            ),
            span,
        }
    }

    /// Creates an error for a token that cannot start an expression.
    pub(super) fn unexpected_expression_start(found: &str, span: Span) -> Self {
        ParseError {
            message: format!("Expected expression, found {}", found),
            span,
        }
    }

    /// Creates an error for a token that cannot start a statement.
    pub(super) fn unrecognized_statement(found: &str, span: Span) -> Self {
        ParseError {
            message: format!("Expected statement, found {}", found),
            span,
        }
    }

    /// Creates an error for an identifier statement that is neither a
    /// reassignment nor a call.
    pub(super) fn dangling_name_statement(name: &str, span: Span) -> Self {
        ParseError {
            message: format!(
                "Expected '=' or '(' after '{}'; a statement must be a reassignment or a call",
                name
            ),
            span,
        }
    }

    /// Creates a "missing statement terminator" error.
    pub(super) fn missing_semicolon(found: &str, span: Span) -> Self {
        ParseError {
            message: format!(
                "Expected ';' at the end of statement, found {}",
                found
            ),
            span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}
