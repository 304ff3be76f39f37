//! Abstract Syntax Tree definitions for the Fenc programming language.
//!
//! This module defines the data structures that represent parsed Fenc
//! programs. The AST is produced by the [`crate::parser`] and consumed by
//! the [`crate::codegen`].
//!
//! # Structure
//!
//! The AST has a hierarchical structure:
//! - [`Program`] - The root node containing all function declarations
//! - [`FnDef`] - A function declaration with typed parameters, return type, and body
//! - [`Stmt`] - Individual statements
//! - [`Expr`] - Expressions (literals, variable reads, calls, binary operations)
//! - [`VarType`] - Type annotations (base type plus pointer depth)
//!
//! Each AST node includes source location information
//! ([`Span`](crate::token::Span)) for error reporting.
//!
//! # Module Structure
//!
//! - [`types`] - Type annotations ([`VarType`], [`BaseType`])
//! - [`expr`] - Expression nodes and kinds
//! - [`stmt`] - Statement nodes and kinds
//! - [`program`] - Top-level program structure ([`Program`], [`FnDef`])
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST from tokens
//! * [`crate::codegen`] - Generates NASM assembly from the AST

mod expr;
mod program;
mod stmt;
mod types;

pub use expr::{BinaryOp, Expr, ExprKind};
pub use program::{FnDef, Param, Program};
pub use stmt::{Stmt, StmtKind};
pub use types::{BaseType, VarType};
