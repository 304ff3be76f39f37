//! Top-level program structure for the Fenc AST.

use crate::token::Span;

use super::stmt::Stmt;
use super::types::VarType;

/// A function parameter: a name with its declared type.
#[derive(Debug, Clone)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared type.
    pub ty: VarType,
    /// The source location of the parameter name.
    pub span: Span,
}

/// A function declaration in the Fenc language.
///
/// Functions are the only top-level construct in Fenc. Every program needs a
/// `main` function: the emitted `_start` stub calls it and passes its return
/// value to the exit syscall.
///
/// # Invariants
///
/// - `params` holds the parameters in declaration order; the code generator
///   rejects more than six of them.
/// - `span` covers the signature from `fnc` to before `{`.
#[derive(Debug, Clone)]
pub struct FnDef {
    /// The name of the function.
    pub name: String,
    /// The parameters in declaration order.
    pub params: Vec<Param>,
    /// The declared return type.
    pub return_type: VarType,
    /// The statements that make up the function body.
    pub body: Vec<Stmt>,
    /// The source location of the function signature.
    pub span: Span,
}

/// The root node of a Fenc program's AST.
///
/// A `Program` is a sequence of function declarations in source order. The
/// order matters: a function only becomes callable once its declaration has
/// been reached, so forward references are rejected during code generation.
#[derive(Debug)]
pub struct Program {
    /// The function declarations in this program.
    pub functions: Vec<FnDef>,
}
