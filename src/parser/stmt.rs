//! Statement and block parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{Stmt, StmtKind};
use crate::token::{Span, TokenKind};

impl Parser {
    /// Parses the statements of a block up to and including the closing `}`.
    ///
    /// The opening `{` has already been consumed by the caller. Ordinary
    /// statements must end with `;` (consumed) or sit directly before the
    /// closing `}`; `if` and `while` statements self-terminate at their own
    /// closing brace, and a trailing `;` after them is tolerated.
    pub(super) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();

        loop {
            if matches!(self.current_kind(), TokenKind::RightBrace) {
                self.advance();
                return Ok(body);
            }

            let stmt = self.parse_stmt()?;
            let self_terminating = matches!(
                stmt.kind,
                StmtKind::If { .. } | StmtKind::While { .. }
            );
            body.push(stmt);

            if self_terminating {
                if matches!(self.current_kind(), TokenKind::Semicolon) {
                    self.advance();
                }
            } else {
                match self.current_kind() {
                    TokenKind::Semicolon => self.advance(),
                    TokenKind::RightBrace => {}
                    _ => {
                        return Err(ParseError::missing_semicolon(
                            &Self::token_kind_display(self.current_kind()),
                            self.current_span(),
                        ));
                    }
                }
            }
        }
    }

    /// Parses a single statement.
    ///
    /// # Grammar
    ///
    /// ```text
    /// stmt → assign_stmt | call_stmt | return_stmt | var_stmt | if_stmt | while_stmt
    /// ```
    pub(super) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::Var => self.parse_var_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Identifier(_) => self.parse_name_stmt(),
            _ => Err(ParseError::unrecognized_statement(
                &Self::token_kind_display(self.current_kind()),
                self.current_span(),
            )),
        }
    }

    /// Parses a statement that begins with an identifier: either a
    /// reassignment (`NAME = expr`) or a call statement (`NAME(args)`).
    fn parse_name_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();

        match self.peek_kind() {
            Some(TokenKind::Equals) => self.parse_assign_stmt(),
            Some(TokenKind::LeftParen) => {
                let name = self.expect_identifier()?;
                let call = self.parse_call(name, start_span)?;
                let span = call.span;
                Ok(Stmt::new(StmtKind::Expr(call), span))
            }
            _ => {
                let name = self.expect_identifier()?;
                Err(ParseError::dangling_name_statement(
                    &name,
                    self.current_span(),
                ))
            }
        }
    }

    /// Parses a variable declaration.
    ///
    /// # Grammar
    ///
    /// ```text
    /// var_stmt → "var" NAME ":" type "=" expr
    /// ```
    fn parse_var_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Var)?;

        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect(&TokenKind::Equals)?;
        let init = self.parse_expr()?;

        let span = Span::new(
            start_span.start,
            init.span.end,
            start_span.line,
            start_span.column,
        );

        Ok(Stmt::new(StmtKind::VarDecl { name, ty, init }, span))
    }

    /// Parses a reassignment statement.
    ///
    /// # Grammar
    ///
    /// ```text
    /// assign_stmt → NAME "=" expr
    /// ```
    fn parse_assign_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Equals)?;
        let value = self.parse_expr()?;

        let span = Span::new(
            start_span.start,
            value.span.end,
            start_span.line,
            start_span.column,
        );

        Ok(Stmt::new(
            StmtKind::Assign {
                name,
                deref: false,
                value,
            },
            span,
        ))
    }

    /// Parses a return statement. Every return carries a value.
    ///
    /// # Grammar
    ///
    /// ```text
    /// return_stmt → "return" expr
    /// ```
    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Return)?;

        let value = self.parse_expr()?;
        let span = Span::new(
            start_span.start,
            value.span.end,
            start_span.line,
            start_span.column,
        );
        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    /// Parses an if statement.
    ///
    /// # Grammar
    ///
    /// ```text
    /// if_stmt → "if" expr "{" block ("else" "{" block)?
    /// ```
    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::If)?;

        let condition = self.parse_expr()?;
        self.expect(&TokenKind::LeftBrace)?;
        let then_branch = self.parse_block()?;

        let else_branch = if matches!(self.current_kind(), TokenKind::Else) {
            self.advance();
            self.expect(&TokenKind::LeftBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        let end = else_branch
            .as_ref()
            .and_then(|branch| branch.last())
            .map(|stmt| stmt.span.end)
            .unwrap_or_else(|| {
                then_branch
                    .last()
                    .map(|stmt| stmt.span.end)
                    .unwrap_or(condition.span.end)
            });
        let span = Span::new(start_span.start, end, start_span.line, start_span.column);

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    /// Parses a while statement.
    ///
    /// # Grammar
    ///
    /// ```text
    /// while_stmt → "while" expr "{" block
    /// ```
    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::While)?;

        let condition = self.parse_expr()?;
        self.expect(&TokenKind::LeftBrace)?;
        let body = self.parse_block()?;

        let end = body
            .last()
            .map(|stmt| stmt.span.end)
            .unwrap_or(condition.span.end);
        let span = Span::new(start_span.start, end, start_span.line, start_span.column);

        Ok(Stmt::new(StmtKind::While { condition, body }, span))
    }
}
