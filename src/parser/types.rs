//! Type annotation parsing.

use super::Parser;
use super::error::ParseError;
use crate::ast::{BaseType, VarType};

impl Parser {
    /// Parses a type annotation.
    ///
    /// `str` is an alias for `char*`: a byte-wide pointee behind one level
    /// of indirection. There is no standalone `char` keyword.
    ///
    /// # Grammar
    ///
    /// ```text
    /// type → "int" | "bool" | "long" | "str"
    /// ```
    pub(super) fn parse_type(&mut self) -> Result<VarType, ParseError> {
        let type_span = self.current_span();
        let name = self.expect_identifier()?;
        match name.as_str() {
            "int" => Ok(VarType::scalar(BaseType::Int)),
            "bool" => Ok(VarType::scalar(BaseType::Bool)),
            "long" => Ok(VarType::scalar(BaseType::Long)),
            "str" => Ok(VarType::pointer(BaseType::Char, 1)),
            _ => Err(ParseError::unknown_type(&name, type_span)),
        }
    }
}
