//! Code generation error types.
//!
//! This module defines [`CodegenError`], which represents errors that can
//! occur during code generation. Because the code generator owns the
//! language's semantic checks, most of these are semantic errors surfaced
//! while walking the AST.

use crate::token::Span;

/// The kind of code generation error.
///
/// This enum allows error handling code to match on error types
/// structurally rather than relying on string matching, which is fragile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenErrorKind {
    /// A variable was read or assigned but never declared.
    UndefinedVariable,
    /// A variable was declared twice in the same function.
    DuplicateVariable,
    /// A function was called but is not in the signature registry.
    UndefinedFunction,
    /// A call's argument count does not match the declared arity.
    ArityMismatch,
    /// A function was declared with more than six parameters.
    TooManyParameters,
    /// A call was made with more than six arguments.
    TooManyArguments,
}

/// An error that occurred during code generation.
///
/// Contains a human-readable message and optionally the source location
/// where the error occurred, enabling rich error reporting.
#[derive(Debug)]
pub struct CodegenError {
    /// A human-readable description of the error.
    message: String,
    /// The source location where the error occurred, if available.
    span: Option<Span>,
    /// The kind of error, for structured error handling.
    kind: CodegenErrorKind,
}

impl CodegenError {
    /// Creates an "undefined variable" error for a read.
    pub(super) fn undefined_variable(name: &str, span: Span) -> Self {
        CodegenError {
            message: format!("Undefined variable: {}", name),
            span: Some(span),
            kind: CodegenErrorKind::UndefinedVariable,
        }
    }

    /// Creates an "undeclared variable" error for a reassignment.
    pub(super) fn reassign_undeclared_variable(name: &str, span: Span) -> Self {
        CodegenError {
            message: format!("Trying to reassign an undeclared variable: {}", name),
            span: Some(span),
            kind: CodegenErrorKind::UndefinedVariable,
        }
    }

    /// Creates a "duplicate variable" error.
    pub(super) fn duplicate_variable(name: &str, span: Span) -> Self {
        CodegenError {
            message: format!("Variable already declared before: {}", name),
            span: Some(span),
            kind: CodegenErrorKind::DuplicateVariable,
        }
    }

    /// Creates an "undefined function" error.
    ///
    /// Also reported for calls to functions declared later in the file;
    /// a function only enters the registry once its declaration is reached.
    pub(super) fn undefined_function(name: &str, span: Span) -> Self {
        CodegenError {
            message: format!("Undefined function: {}", name),
            span: Some(span),
            kind: CodegenErrorKind::UndefinedFunction,
        }
    }

    /// Creates a call arity mismatch error.
    pub(super) fn arity_mismatch(span: Span) -> Self {
        CodegenError {
            message: "Unexpected number of arguments on function call".to_string(),
            span: Some(span),
            kind: CodegenErrorKind::ArityMismatch,
        }
    }

    /// Creates a "too many parameters" error for a declaration.
    pub(super) fn too_many_parameters(span: Span) -> Self {
        CodegenError {
            message: "No more than 6 arguments on functions are allowed".to_string(),
            span: Some(span),
            kind: CodegenErrorKind::TooManyParameters,
        }
    }

    /// Creates a "too many arguments" error for a call site.
    pub(super) fn too_many_arguments(span: Span) -> Self {
        CodegenError {
            message: "Max number of params allowed in functions: 6".to_string(),
            span: Some(span),
            kind: CodegenErrorKind::TooManyArguments,
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source location where the error occurred, if available.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> CodegenErrorKind {
        self.kind
    }
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}:{}: {}", span.line, span.column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CodegenError {}
