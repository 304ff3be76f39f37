//! Expression nodes for the Fenc AST.

use crate::token::Span;

/// A binary operator in the Fenc language.
///
/// Comparison operators produce 0/1 in the accumulator; arithmetic operators
/// produce a 64-bit result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition `+`.
    Add,
    /// Subtraction `-`.
    Sub,
    /// Multiplication `*`.
    Mul,
    /// Division `/`.
    Div,
    /// Modulo `%`.
    Mod,
    /// Less than `<`.
    Lt,
    /// Greater than `>`.
    Gt,
    /// Equality `==`.
    Eq,
    /// Inequality `!=`.
    Neq,
    /// Less than or equal `<=`.
    Lte,
}

/// The kind of an expression in the Fenc language.
///
/// This enum represents the different types of expressions without
/// source location information. Use [`Expr`] for the full AST node
/// with span information.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// An integer literal value.
    IntLiteral(i64),

    /// A boolean literal (`true` or `false`).
    BoolLiteral(bool),

    /// A string literal value.
    ///
    /// Holds the raw source bytes between the quotes; any byte except `"`
    /// can appear, including values that are not valid UTF-8. The code
    /// generator emits them into the data segment with a trailing NUL.
    StringLiteral(Vec<u8>),

    /// A variable read.
    ///
    /// `derefs` counts pointer-dereference steps applied to the read. The
    /// parser always produces 0; leading `*` on reads is an open grammar
    /// extension that the code generator already supports.
    VarRead {
        /// The name of the variable being read.
        name: String,
        /// Number of pointer-dereference steps to apply.
        derefs: u8,
    },

    /// A function call expression.
    Call {
        /// The name of the function being called.
        callee: String,
        /// The arguments passed to the function.
        args: Vec<Expr>,
    },

    /// A binary operation.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The left-hand operand.
        lhs: Box<Expr>,
        /// The right-hand operand.
        rhs: Box<Expr>,
    },
}

/// An expression in the Fenc language with source location.
#[derive(Debug, Clone)]
pub struct Expr {
    /// The kind of expression.
    pub kind: ExprKind,
    /// The source location of this expression.
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given kind and span.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Returns true when this expression is a function call.
    ///
    /// The code generator uses this to order argument emission: call-valued
    /// arguments are materialized before plain arguments so that an inner
    /// call cannot clobber already-loaded parameter registers.
    pub fn is_call(&self) -> bool {
        matches!(self.kind, ExprKind::Call { .. })
    }
}
