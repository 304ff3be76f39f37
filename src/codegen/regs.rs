//! Register and operand-size tables for the System V AMD64 convention.
//!
//! Three widths cover every Fenc type: qword for `long`, `any`, and all
//! pointers; dword for `int`; byte for `bool` and `char`. There is no
//! word-wide type.

use crate::ast::{BaseType, VarType};

/// Parameter registers 0..5, 64-bit names.
const PARAM_REGS_64: [&str; 6] = ["rdi", "rsi", "rdx", "rcx", "r8", "r9"];
/// Parameter registers 0..5, 32-bit names.
const PARAM_REGS_32: [&str; 6] = ["edi", "esi", "edx", "ecx", "r8d", "r9d"];
/// Parameter registers 0..5, 8-bit names.
const PARAM_REGS_8: [&str; 6] = ["dil", "sil", "dl", "cl", "r8b", "r9b"];

/// The integer-register calling convention passes at most six parameters.
pub(super) const MAX_PARAMS: usize = 6;

/// Width classes used to index the register tables.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Width {
    Qword,
    Dword,
    Byte,
}

fn width_of(ty: VarType) -> Width {
    if ty.is_pointer() {
        return Width::Qword;
    }
    match ty.base {
        BaseType::Long | BaseType::Any => Width::Qword,
        BaseType::Int => Width::Dword,
        BaseType::Bool | BaseType::Char => Width::Byte,
    }
}

/// Returns the parameter register for positional `slot`, in the
/// sub-register width matching `ty`.
///
/// # Panics
///
/// Panics if `slot >= MAX_PARAMS`; callers check the parameter and
/// argument counts before emitting moves.
pub(super) fn param_reg(ty: VarType, slot: usize) -> &'static str {
    match width_of(ty) {
        Width::Qword => PARAM_REGS_64[slot],
        Width::Dword => PARAM_REGS_32[slot],
        Width::Byte => PARAM_REGS_8[slot],
    }
}

/// Returns the accumulator (return-value) register in the sub-register
/// width matching `ty`.
pub(super) fn return_reg(ty: VarType) -> &'static str {
    match width_of(ty) {
        Width::Qword => "rax",
        Width::Dword => "eax",
        Width::Byte => "al",
    }
}

/// Returns the NASM operand-size word matching `ty`.
pub(super) fn size_word(ty: VarType) -> &'static str {
    match width_of(ty) {
        Width::Qword => "qword",
        Width::Dword => "dword",
        Width::Byte => "byte",
    }
}
