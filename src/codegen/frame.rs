//! Per-function frame state.
//!
//! A [`Frame`] is created on entry to each function and discarded at its
//! end. It tracks the locals with their `rbp`-relative offsets, the running
//! frame size, and the label counters for `if` and `while` statements.

use super::error::CodegenError;
use crate::ast::VarType;
use crate::token::Span;
use std::collections::HashMap;

/// A local variable: its frame slot and declared type.
///
/// The slot is addressed as `[rbp - rbp_offset]`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Local {
    /// Byte distance below `rbp` at which the local lives.
    pub rbp_offset: u32,
    /// The declared type.
    pub ty: VarType,
}

/// Compile-time state scoped to a single function.
pub(super) struct Frame {
    /// Locals by name. Parameters are installed first.
    locals: HashMap<String, Local>,
    /// Running frame offset; equals the frame size once the body is done.
    rbp_offset: u32,
    /// Counter minting `.ELSE{n}`/`.ENDIF{n}` label pairs.
    if_counter: u32,
    /// Counter minting `.WHILE{n}`/`.ENDWHILE{n}` label pairs.
    while_counter: u32,
}

impl Frame {
    /// Creates an empty frame.
    pub(super) fn new() -> Self {
        Frame {
            locals: HashMap::new(),
            rbp_offset: 0,
            if_counter: 0,
            while_counter: 0,
        }
    }

    /// Declares a local, claiming the next frame slot for its type.
    ///
    /// The offset advances by the type's byte size before the slot is
    /// handed out, so offsets are positive and strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is already declared in this function.
    pub(super) fn declare(
        &mut self,
        name: &str,
        ty: VarType,
        span: Span,
    ) -> Result<u32, CodegenError> {
        if self.locals.contains_key(name) {
            return Err(CodegenError::duplicate_variable(name, span));
        }

        self.rbp_offset += ty.byte_size();
        let offset = self.rbp_offset;
        self.locals.insert(name.to_string(), Local {
            rbp_offset: offset,
            ty,
        });
        Ok(offset)
    }

    /// Looks up a local by name.
    pub(super) fn lookup(&self, name: &str) -> Option<Local> {
        self.locals.get(name).copied()
    }

    /// Returns the total frame size: the sum of all declared local sizes.
    pub(super) fn size(&self) -> u32 {
        self.rbp_offset
    }

    /// Claims the next `if` label number.
    ///
    /// Claiming on statement entry keeps labels unique even when an `if`
    /// nests inside another's branch.
    pub(super) fn next_if_label(&mut self) -> u32 {
        let label = self.if_counter;
        self.if_counter += 1;
        label
    }

    /// Claims the next `while` label number.
    pub(super) fn next_while_label(&mut self) -> u32 {
        let label = self.while_counter;
        self.while_counter += 1;
        label
    }
}
