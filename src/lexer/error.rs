//! Lexical analysis error types.
//!
//! This module defines [`LexError`], which represents errors that can occur
//! during tokenization.

use crate::token::Span;

/// An error that occurred during lexical analysis.
///
/// `LexError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting with tools
/// like [`ariadne`].
///
/// [`ariadne`]: https://docs.rs/ariadne
#[derive(Debug)]
pub struct LexError {
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
}

impl LexError {
    /// Creates an "unexpected byte" error.
    ///
    /// Printable ASCII bytes are shown as characters; anything else is
    /// shown in hex, since the source need not be valid UTF-8.
    pub(super) fn unexpected_byte(byte: u8, span: Span) -> Self {
        let message = if byte.is_ascii_graphic() || byte == b' ' {
            format!("Unexpected character: '{}'", byte as char)
        } else {
            format!("Unexpected byte: 0x{:02x}", byte)
        };
        LexError { message, span }
    }

    /// Creates an "unterminated string" error.
    ///
    /// Reported when the end of input is reached before the closing quote.
    pub(super) fn unterminated_string(span: Span) -> Self {
        LexError {
            message: "Unterminated string literal".to_string(),
            span,
        }
    }

    /// Creates an "integer literal out of range" error.
    pub(super) fn integer_overflow(literal: &str, span: Span) -> Self {
        LexError {
            message: format!("Integer literal '{}' does not fit in 64 bits", literal),
            span,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexError {}
