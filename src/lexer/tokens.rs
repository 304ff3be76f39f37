//! Token reading and recognition for the lexer.
//!
//! This module provides methods for reading the various token types from
//! the input bytes: identifiers, keywords, string literals, integer
//! literals, and punctuation.

use super::Lexer;
use super::error::LexError;
use crate::token::{Span, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Creates a single-byte token and advances the lexer.
    fn single_byte_token(
        &mut self,
        kind: TokenKind,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        self.advance();
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Token::new(kind, span)
    }

    /// Creates a token for a one-byte operator that may be followed by `=`
    /// to form a two-byte operator (`=`/`==`, `<`/`<=`).
    fn maybe_equals_token(
        &mut self,
        bare: TokenKind,
        with_equals: TokenKind,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        self.advance();
        let kind = if self.current_byte() == Some(b'=') {
            self.advance();
            with_equals
        } else {
            bare
        };
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        Token::new(kind, span)
    }

    /// Reads and returns the next token from the input.
    ///
    /// This method is called repeatedly by [`tokenize`](super::Lexer::tokenize)
    /// to produce the token stream. It assumes that whitespace has already
    /// been skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if an unexpected byte is encountered or if a
    /// string literal is malformed.
    pub(super) fn next_token(&mut self) -> Result<Token, LexError> {
        let byte = self.current_byte().ok_or_else(|| {
            LexError::unexpected_byte(0, Span::point(self.pos, self.line, self.column))
        })?;

        let start_pos = self.pos;
        let start_line = self.line;
        let start_column = self.column;

        if let Some(token) =
            self.next_punctuation_or_operator(byte, start_pos, start_line, start_column)
        {
            return token;
        }

        if byte == b'"' {
            return self.read_string(start_pos, start_line, start_column);
        }

        if byte.is_ascii_digit() {
            return self.read_number(start_pos, start_line, start_column);
        }

        if byte.is_ascii_alphabetic() || byte == b'_' {
            return Ok(self.read_identifier(start_pos, start_line, start_column));
        }

        let span = Span::new(self.pos, self.pos + 1, self.line, self.column);
        Err(LexError::unexpected_byte(byte, span))
    }

    fn next_punctuation_or_operator(
        &mut self,
        byte: u8,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Option<Result<Token, LexError>> {
        let token = match byte {
            b'(' => Ok(self.single_byte_token(
                TokenKind::LeftParen,
                start_pos,
                start_line,
                start_column,
            )),
            b')' => Ok(self.single_byte_token(
                TokenKind::RightParen,
                start_pos,
                start_line,
                start_column,
            )),
            b'[' => Ok(self.single_byte_token(
                TokenKind::LeftBracket,
                start_pos,
                start_line,
                start_column,
            )),
            b']' => Ok(self.single_byte_token(
                TokenKind::RightBracket,
                start_pos,
                start_line,
                start_column,
            )),
            b'{' => Ok(self.single_byte_token(
                TokenKind::LeftBrace,
                start_pos,
                start_line,
                start_column,
            )),
            b'}' => Ok(self.single_byte_token(
                TokenKind::RightBrace,
                start_pos,
                start_line,
                start_column,
            )),
            b';' => Ok(self.single_byte_token(
                TokenKind::Semicolon,
                start_pos,
                start_line,
                start_column,
            )),
            b':' => {
                Ok(self.single_byte_token(TokenKind::Colon, start_pos, start_line, start_column))
            }
            b',' => {
                Ok(self.single_byte_token(TokenKind::Comma, start_pos, start_line, start_column))
            }
            b'=' => Ok(self.maybe_equals_token(
                TokenKind::Equals,
                TokenKind::EqualEqual,
                start_pos,
                start_line,
                start_column,
            )),
            b'<' => Ok(self.maybe_equals_token(
                TokenKind::LessThan,
                TokenKind::LessEqual,
                start_pos,
                start_line,
                start_column,
            )),
            b'>' => Ok(self.single_byte_token(
                TokenKind::GreaterThan,
                start_pos,
                start_line,
                start_column,
            )),
            b'!' => {
                self.advance();
                if self.current_byte() == Some(b'=') {
                    self.advance();
                    let span = Span::new(start_pos, self.pos, start_line, start_column);
                    Ok(Token::new(TokenKind::BangEqual, span))
                } else {
                    Err(LexError::unexpected_byte(
                        b'!',
                        Span::new(start_pos, self.pos, start_line, start_column),
                    ))
                }
            }
            b'+' => Ok(self.single_byte_token(TokenKind::Plus, start_pos, start_line, start_column)),
            b'-' => {
                Ok(self.single_byte_token(TokenKind::Minus, start_pos, start_line, start_column))
            }
            b'*' => Ok(self.single_byte_token(TokenKind::Star, start_pos, start_line, start_column)),
            b'/' => {
                Ok(self.single_byte_token(TokenKind::Slash, start_pos, start_line, start_column))
            }
            b'%' => {
                Ok(self.single_byte_token(TokenKind::Percent, start_pos, start_line, start_column))
            }
            _ => return None,
        };

        Some(token)
    }

    /// Reads a string literal from the input.
    ///
    /// The opening double quote is at the current position. The content is
    /// taken verbatim - Fenc has no escape sequences and no encoding rules,
    /// so every byte up to the next `"` (including backslashes, newlines,
    /// and bytes that are not valid UTF-8) belongs to the literal.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the end of input is reached before the
    /// closing quote.
    fn read_string(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.advance(); // skip opening "
        let content_start = self.pos;

        loop {
            match self.current_byte() {
                Some(b'"') => {
                    let value = self.input[content_start..self.pos].to_vec();
                    self.advance(); // skip closing "
                    let span = Span::new(start_pos, self.pos, start_line, start_column);
                    return Ok(Token::new(TokenKind::StringLiteral(value), span));
                }
                Some(_) => self.advance(),
                None => {
                    return Err(LexError::unterminated_string(Span::new(
                        start_pos,
                        self.pos,
                        start_line,
                        start_column,
                    )));
                }
            }
        }
    }

    /// Reads an integer literal from the input.
    ///
    /// Integer literals are one or more ASCII digits, accumulated into an
    /// `i64` with checked arithmetic.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the value exceeds the `i64` range. The
    /// whole digit run is consumed first so the error spans the full
    /// literal.
    fn read_number(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        let mut value: i64 = 0;
        let mut overflowed = false;

        while let Some(byte) = self.current_byte() {
            if !byte.is_ascii_digit() {
                break;
            }
            let digit = (byte - b'0') as i64;
            value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(v) => v,
                None => {
                    overflowed = true;
                    0
                }
            };
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_column);

        if overflowed {
            let literal = String::from_utf8_lossy(&self.input[start_pos..self.pos]);
            return Err(LexError::integer_overflow(&literal, span));
        }

        Ok(Token::new(TokenKind::IntLiteral(value), span))
    }

    /// Reads an identifier or keyword from the input.
    ///
    /// Identifiers consist of an ASCII alphabetic byte or underscore
    /// followed by any number of ASCII alphanumerics or underscores; the
    /// run is always plain ASCII, so the text converts losslessly. If the
    /// identifier matches a keyword (`fnc`, `return`, `var`, `if`, `else`,
    /// `while`, `for`, `include`), the corresponding keyword token is
    /// returned instead.
    fn read_identifier(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Token {
        while self
            .current_byte()
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
        {
            self.advance();
        }

        let value = String::from_utf8_lossy(&self.input[start_pos..self.pos]).into_owned();
        let span = Span::new(start_pos, self.pos, start_line, start_column);

        let kind = match value.as_str() {
            "fnc" => TokenKind::Fnc,
            "return" => TokenKind::Return,
            "var" => TokenKind::Var,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "include" => TokenKind::Include,
            _ => TokenKind::Identifier(value),
        };

        Token::new(kind, span)
    }
}
