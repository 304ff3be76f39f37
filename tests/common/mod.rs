//! Common test utilities for Fenc integration tests.
//!
//! This module provides shared helper functions used across all integration
//! test files.

// Each test file is compiled as a separate crate, so not all functions
// are used in every test file. This is expected behavior.
#![allow(dead_code)]

use fenc::codegen::{Codegen, CodegenError};
use fenc::lexer::Lexer;
use fenc::parser::Parser;

/// Runs the full pipeline on raw source bytes with the given built-in
/// assembly text, returning the emitted assembly or the first phase error
/// rendered as a string.
pub fn compile_bytes_with_builtins(source: &[u8], builtin_asm: &str) -> Result<String, String> {
    let tokens = Lexer::new(source).tokenize().map_err(|e| e.to_string())?;
    let program = Parser::new(tokens).parse().map_err(|e| e.to_string())?;
    Codegen::new(builtin_asm)
        .compile(&program)
        .map_err(|e| e.to_string())
}

/// Runs the full pipeline on string source with built-in assembly text.
pub fn compile_with_builtins(source: &str, builtin_asm: &str) -> Result<String, String> {
    compile_bytes_with_builtins(source.as_bytes(), builtin_asm)
}

/// Runs the full pipeline on `source` with no built-in assembly.
pub fn compile_source(source: &str) -> Result<String, String> {
    compile_with_builtins(source, "")
}

/// Compiles `source`, panicking with the error on failure.
pub fn compile(source: &str) -> String {
    compile_source(source)
        .unwrap_or_else(|e| panic!("Compilation failed for {:?}: {}", source, e))
}

/// Compiles raw source bytes, panicking with the error on failure.
///
/// Use this for sources that are not valid UTF-8 (e.g., string literals
/// holding arbitrary bytes).
pub fn compile_bytes(source: &[u8]) -> String {
    compile_bytes_with_builtins(source, "")
        .unwrap_or_else(|e| panic!("Compilation failed for {:?}: {}", source, e))
}

/// Compiles `source` expecting a codegen error and returns it.
pub fn codegen_error(source: &str) -> CodegenError {
    let tokens = Lexer::new(source.as_bytes())
        .tokenize()
        .unwrap_or_else(|e| panic!("Lexer failed for {:?}: {}", source, e));
    let program = Parser::new(tokens)
        .parse()
        .unwrap_or_else(|e| panic!("Parser failed for {:?}: {}", source, e));
    match Codegen::new("").compile(&program) {
        Ok(asm) => panic!(
            "Expected codegen to fail for {:?}, but it produced {} bytes",
            source,
            asm.len()
        ),
        Err(e) => e,
    }
}

/// Returns the path to the fenc binary built by cargo.
pub fn fenc_binary() -> String {
    env!("CARGO_BIN_EXE_fenc").to_string()
}

/// Asserts that `needles` appear in `haystack` in the given order.
pub fn assert_contains_in_order(haystack: &str, needles: &[&str]) {
    let mut position = 0;
    for needle in needles {
        match haystack[position..].find(needle) {
            Some(found) => position += found + needle.len(),
            None => panic!(
                "Expected {:?} after byte {} in output:\n{}",
                needle, position, haystack
            ),
        }
    }
}
