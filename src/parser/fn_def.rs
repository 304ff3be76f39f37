//! Function declaration parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{FnDef, Param};
use crate::token::{Span, TokenKind};

impl Parser {
    /// Parses a function declaration.
    ///
    /// # Grammar
    ///
    /// ```text
    /// fn_def → "fnc" NAME "(" params? ")" ">" type "{" block
    /// params → NAME ":" type ("," NAME ":" type)*
    /// ```
    ///
    /// The parameter-count limit (six) is enforced by the code generator,
    /// matching the calling convention it implements.
    pub(super) fn parse_fn_def(&mut self) -> Result<FnDef, ParseError> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Fnc)?;

        let name = self.expect_identifier()?;

        self.expect(&TokenKind::LeftParen)?;
        let params = self.parse_params()?;

        // `>` separates the parameter list from the return type.
        self.expect(&TokenKind::GreaterThan)?;
        let return_type = self.parse_type()?;

        let sig_end = self.current_span();
        self.expect(&TokenKind::LeftBrace)?;
        let body = self.parse_block()?;

        let span = Span::new(
            start_span.start,
            sig_end.end,
            start_span.line,
            start_span.column,
        );

        Ok(FnDef {
            name,
            params,
            return_type,
            body,
            span,
        })
    }

    /// Parses a parameter list up to and including the closing `)`.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if matches!(self.current_kind(), TokenKind::RightParen) {
            self.advance();
            return Ok(params);
        }

        loop {
            let param_span = self.current_span();
            let name = self.expect_identifier()?;
            self.expect(&TokenKind::Colon)?;
            let ty = self.parse_type()?;
            params.push(Param {
                name,
                ty,
                span: param_span,
            });

            match self.current_kind() {
                TokenKind::Comma => self.advance(),
                TokenKind::RightParen => {
                    self.advance();
                    return Ok(params);
                }
                _ => {
                    return Err(ParseError {
                        message: format!(
                            "Expected ',' or ')' in parameter list, found {}",
                            Self::token_kind_display(self.current_kind())
                        ),
                        span: self.current_span(),
                    });
                }
            }
        }
    }
}
