//! Lexical analyzer for the Fenc programming language.
//!
//! This module provides the [`Lexer`] struct which converts a raw byte
//! string of source code into a stream of [`Token`]s for parsing.
//!
//! # Overview
//!
//! The lexer performs the following tasks:
//! - Scans the input byte by byte; the source carries no encoding
//!   assumptions, so files that are not valid UTF-8 lex fine
//! - Recognizes identifiers, keywords, literals, and punctuation
//! - Tracks byte positions and line/byte-column numbers for error reporting
//! - Skips whitespace (spaces, newlines, tabs)
//!
//! # Supported Tokens
//!
//! - **Keywords**: `fnc`, `return`, `var`, `if`, `else`, `while`, `for`, `include`
//! - **Identifiers**: `[A-Za-z_][A-Za-z0-9_]*`
//! - **Integer literals**: sequences of ASCII digits, stored as `i64`
//! - **String literals**: enclosed in double quotes; the content is taken
//!   verbatim with no escape processing, and any byte except `"` may appear
//! - **Punctuation/operators**: `( ) [ ] { } ; : , = == != < <= > + - * / %`
//!
//! # Examples
//!
//! ```
//! use fenc::lexer::Lexer;
//! use fenc::token::TokenKind;
//!
//! let mut lexer = Lexer::new(b"printint(7)");
//! let tokens = lexer.tokenize().unwrap();
//!
//! assert!(matches!(tokens[0].kind, TokenKind::Identifier(_)));
//! assert!(matches!(tokens[1].kind, TokenKind::LeftParen));
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types for lexical analysis
//! - `cursor` - Position tracking and byte navigation
//! - `tokens` - Token recognition and reading
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Parser that consumes the token stream

mod cursor;
mod error;
mod tokens;


pub use error::LexError;

use crate::token::{Span, Token, TokenKind};

/// A lexical analyzer that tokenizes Fenc source bytes.
///
/// The `Lexer` maintains its position within the input and tracks
/// line/byte-column numbers for error reporting. It is designed to be used
/// once per source file.
///
/// # Lifetime
///
/// The `'a` lifetime parameter ties the lexer to the input byte slice,
/// ensuring the input remains valid while the lexer is in use.
pub struct Lexer<'a> {
    /// The source bytes being tokenized.
    pub(super) input: &'a [u8],
    /// Current byte position in the input.
    pub(super) pos: usize,
    /// Current line number (1-indexed).
    pub(super) line: usize,
    /// Current byte column number (1-indexed).
    pub(super) column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` for the given input bytes.
    ///
    /// The lexer starts at the beginning of the input with line and column
    /// numbers initialized to 1.
    pub fn new(input: &'a [u8]) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the entire input and returns a vector of tokens.
    ///
    /// This method consumes the input from start to end, producing tokens
    /// until the end of input is reached. The returned vector always ends
    /// with an [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An unexpected byte is encountered outside a string literal
    /// - A string literal is not terminated before end of input
    /// - An integer literal exceeds the i64 range
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_eof() {
                let span = Span::point(self.pos, self.line, self.column);
                tokens.push(Token::new(TokenKind::Eof, span));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Skips spaces, newlines, and tabs. Other bytes (including `\r`) are
    /// not whitespace in Fenc and fall through to token recognition.
    fn skip_whitespace(&mut self) {
        while matches!(self.current_byte(), Some(b' ') | Some(b'\n') | Some(b'\t')) {
            self.advance();
        }
    }
}
