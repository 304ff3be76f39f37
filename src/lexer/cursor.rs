//! Cursor position management for the lexer.
//!
//! This module provides methods for tracking and advancing the lexer's
//! position within the input source bytes.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Returns the current byte without consuming it.
    ///
    /// Returns `None` if the end of input has been reached.
    pub(super) fn current_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Returns `true` if the end of input has been reached.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Advances the lexer by one byte.
    ///
    /// Updates the position, line, and column tracking. The line counter
    /// advances at each 0x0A byte; the column counts bytes, so a multi-byte
    /// character in the source advances it once per byte.
    pub(super) fn advance(&mut self) {
        if let Some(byte) = self.current_byte() {
            self.pos += 1;
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}
