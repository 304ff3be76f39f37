//! Expression parsing with precedence climbing.
//!
//! Expressions are parsed with a fixed ladder of precedence levels. Each
//! level parses its operands one level tighter and folds operators at its own
//! level left-to-right, giving left-associativity.

use super::Parser;
use super::error::ParseError;
use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::token::{Span, TokenKind};

/// Precedence levels, loosest first. Parsing starts at `LEVEL_COMPARISON`
/// and recurses toward `LEVEL_PRIMARY`.
///
/// - Level 0: `<`, `>`, `==`, `<=`, `!=` (comparisons)
/// - Level 1: `+`, `-` (additive)
/// - Level 2: `*`, `/`, `%` (multiplicative)
/// - Level 3: primary expressions
const LEVEL_COMPARISON: u8 = 0;
const LEVEL_ADDITIVE: u8 = 1;
const LEVEL_MULTIPLICATIVE: u8 = 2;
const LEVEL_PRIMARY: u8 = 3;

/// Returns the binary operator for `kind` if it binds at `level`.
fn binary_op_at_level(kind: &TokenKind, level: u8) -> Option<BinaryOp> {
    let (op, op_level) = match kind {
        TokenKind::LessThan => (BinaryOp::Lt, LEVEL_COMPARISON),
        TokenKind::GreaterThan => (BinaryOp::Gt, LEVEL_COMPARISON),
        TokenKind::EqualEqual => (BinaryOp::Eq, LEVEL_COMPARISON),
        TokenKind::BangEqual => (BinaryOp::Neq, LEVEL_COMPARISON),
        TokenKind::LessEqual => (BinaryOp::Lte, LEVEL_COMPARISON),
        TokenKind::Plus => (BinaryOp::Add, LEVEL_ADDITIVE),
        TokenKind::Minus => (BinaryOp::Sub, LEVEL_ADDITIVE),
        TokenKind::Star => (BinaryOp::Mul, LEVEL_MULTIPLICATIVE),
        TokenKind::Slash => (BinaryOp::Div, LEVEL_MULTIPLICATIVE),
        TokenKind::Percent => (BinaryOp::Mod, LEVEL_MULTIPLICATIVE),
        _ => return None,
    };
    (op_level == level).then_some(op)
}

impl Parser {
    /// Parses an expression.
    ///
    /// This is the main entry point for expression parsing. It handles
    /// operator precedence and left-associativity.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_at_level(LEVEL_COMPARISON)
    }

    /// Parses an expression at a single precedence level.
    ///
    /// The algorithm:
    /// 1. Parse an operand one level tighter
    /// 2. While the current token is an operator at this level, consume it
    ///    and parse the right-hand side one level tighter
    /// 3. Fold the operands left-to-right
    ///
    /// Because the right-hand side is parsed at the tighter level and the
    /// fold happens in the loop, `1 - 2 - 3` parses as `(1 - 2) - 3`.
    fn parse_expr_at_level(&mut self, level: u8) -> Result<Expr, ParseError> {
        if level >= LEVEL_PRIMARY {
            return self.parse_primary_expr();
        }

        let mut left = self.parse_expr_at_level(level + 1)?;

        while let Some(op) = binary_op_at_level(self.current_kind(), level) {
            self.advance();
            let right = self.parse_expr_at_level(level + 1)?;

            let span = Span::new(
                left.span.start,
                right.span.end,
                left.span.line,
                left.span.column,
            );
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(left),
                    rhs: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// Parses a primary expression (atom).
    ///
    /// Primary expressions are the basic building blocks:
    /// - Integer literals
    /// - String literals
    /// - `true` / `false` boolean literals
    /// - Variable reads
    /// - Function calls
    ///
    /// There are no parenthesized primaries in Fenc; `(` only appears as
    /// part of a call.
    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let start_span = self.current_span();

        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();

                // Boolean literals are an identifier form.
                match name.as_str() {
                    "true" => return Ok(Expr::new(ExprKind::BoolLiteral(true), start_span)),
                    "false" => return Ok(Expr::new(ExprKind::BoolLiteral(false), start_span)),
                    _ => {}
                }

                if matches!(self.current_kind(), TokenKind::LeftParen) {
                    self.parse_call(name, start_span)
                } else {
                    Ok(Expr::new(ExprKind::VarRead { name, derefs: 0 }, start_span))
                }
            }
            TokenKind::IntLiteral(value) => {
                let value = *value;
                self.advance();
                Ok(Expr::new(ExprKind::IntLiteral(value), start_span))
            }
            TokenKind::StringLiteral(value) => {
                let value = value.clone();
                self.advance();
                Ok(Expr::new(ExprKind::StringLiteral(value), start_span))
            }
            _ => Err(ParseError::unexpected_expression_start(
                &Self::token_kind_display(self.current_kind()),
                start_span,
            )),
        }
    }

    /// Parses a function call expression.
    ///
    /// The callee identifier has already been consumed. This method parses
    /// the argument list within parentheses.
    ///
    /// # Grammar
    ///
    /// ```text
    /// call      → IDENTIFIER "(" arguments? ")"
    /// arguments → expr ("," expr)*
    /// ```
    pub(super) fn parse_call(
        &mut self,
        callee: String,
        start_span: Span,
    ) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let mut args = Vec::new();

        if !matches!(self.current_kind(), TokenKind::RightParen) {
            loop {
                let arg = self.parse_expr()?;
                args.push(arg);

                if matches!(self.current_kind(), TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let end_span = self.current_span();
        self.expect(&TokenKind::RightParen)?;

        // Span covers from callee to closing paren
        let span = Span::new(
            start_span.start,
            end_span.end,
            start_span.line,
            start_span.column,
        );

        Ok(Expr::new(ExprKind::Call { callee, args }, span))
    }
}
