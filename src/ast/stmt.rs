//! Statement nodes for the Fenc AST.

use crate::token::Span;

use super::expr::Expr;
use super::types::VarType;

/// The kind of a statement in the Fenc language.
///
/// This enum represents the different types of statements without
/// source location information. Use [`Stmt`] for the full AST node
/// with span information.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// An expression statement.
    ///
    /// Evaluates the expression for its side effects; in practice this is
    /// always a function call. The result value is discarded.
    Expr(Expr),

    /// A variable declaration with `var`.
    ///
    /// Declares a new variable with an explicit type annotation and
    /// initializer expression. The declaration claims a new frame slot.
    VarDecl {
        /// The name of the variable being declared.
        name: String,
        /// The type annotation for the variable.
        ty: VarType,
        /// The initializer expression.
        init: Expr,
    },

    /// A reassignment of an existing variable.
    ///
    /// When `deref` is true the store goes through the pointer held in the
    /// variable's slot rather than into the slot itself. The parser always
    /// produces `false`; `*`-store syntax is an open grammar extension that
    /// the code generator already supports.
    Assign {
        /// The name of the variable being assigned.
        name: String,
        /// Whether to store through the pointer in the slot.
        deref: bool,
        /// The value expression.
        value: Expr,
    },

    /// A return statement. Every function returns a value.
    Return(Expr),

    /// A conditional statement with optional `else` branch.
    If {
        /// The condition expression.
        condition: Expr,
        /// Statements executed when the condition is nonzero.
        then_branch: Vec<Stmt>,
        /// Optional statements executed when the condition is zero.
        else_branch: Option<Vec<Stmt>>,
    },

    /// A while loop statement.
    While {
        /// The loop condition.
        condition: Expr,
        /// Statements executed for each iteration.
        body: Vec<Stmt>,
    },
}

/// A statement in the Fenc language with source location.
#[derive(Debug, Clone)]
pub struct Stmt {
    /// The kind of statement.
    pub kind: StmtKind,
    /// The source location of this statement.
    pub span: Span,
}

impl Stmt {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}
