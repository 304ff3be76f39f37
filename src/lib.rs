//! The Fenc programming language compiler library.
//!
//! This library provides the core components of the Fenc compiler:
//! lexical analysis, parsing, and NASM x86_64 code generation.
//!
//! # Modules
//!
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`parser`] - Recursive descent parser
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`codegen`] - NASM assembly generation
//!
//! # Example
//!
//! ```
//! use fenc::lexer::Lexer;
//! use fenc::parser::Parser;
//! use fenc::codegen::Codegen;
//!
//! // Source code to compile (sources are raw bytes)
//! let source = b"fnc main(argc: int, argv: long, envp: long) > int { return 0; }";
//!
//! // Lexical analysis
//! let mut lexer = Lexer::new(source);
//! let tokens = lexer.tokenize().expect("Lexer error");
//!
//! // Parsing
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse().expect("Parse error");
//!
//! // Code generation (built-in assembly text is spliced in verbatim)
//! let mut codegen = Codegen::new("");
//! let assembly = codegen.compile(&program).expect("Codegen error");
//!
//! assert!(assembly.contains("main:"));
//! ```

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod token;
