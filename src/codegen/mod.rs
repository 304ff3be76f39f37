//! NASM code generation for the Fenc programming language.
//!
//! This module provides the [`Codegen`] struct which transforms a Fenc AST
//! into NASM x86_64 assembly text for Linux.
//!
//! # Overview
//!
//! The code generator walks the AST once and performs the following tasks:
//!
//! - Emits the `_start` entry stub (argc/argv/envp marshalling, `call main`,
//!   exit syscall)
//! - Splices the built-in assembly text verbatim into the text segment
//! - Emits each user function with its prologue, parameter spills, body, and
//!   the shared `.retpoint` epilogue
//! - Collects string literals into the `.data` segment
//! - Emits an empty `.bss` segment
//!
//! It also owns the semantic checks of the language: undeclared and
//! redeclared variables, undefined functions, call arity, and the
//! six-parameter limit of the System V AMD64 integer-register convention.
//!
//! # Architecture
//!
//! Expressions follow an accumulator discipline: every expression leaves its
//! result in the `rax`-family register of its type's width. Locals live at
//! `rbp`-relative offsets assigned in declaration order. Control flow lowers
//! to local labels numbered by per-function counters.
//!
//! # Example
//!
//! ```
//! use fenc::codegen::Codegen;
//! use fenc::lexer::Lexer;
//! use fenc::parser::Parser;
//!
//! let source = b"fnc main(argc: int, argv: long, envp: long) > int { return 0; }";
//! let tokens = Lexer::new(source).tokenize().unwrap();
//! let program = Parser::new(tokens).parse().unwrap();
//!
//! let mut codegen = Codegen::new("");
//! let assembly = codegen.compile(&program).unwrap();
//! assert!(assembly.contains("global _start"));
//! assert!(assembly.contains(".retpoint:"));
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types for code generation
//! - [`builtins`] - Built-in signature seeding and source list
//! - `frame` - Per-function frame state (locals, label counters)
//! - `regs` - Register and operand-size tables
//! - `stmt` - Statement code generation
//! - `expr` - Expression code generation
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::ast`] - The AST types consumed by this module

pub mod builtins;
mod error;
mod expr;
mod frame;
mod regs;
mod stmt;

#[cfg(test)]
mod tests;

pub use error::{CodegenError, CodegenErrorKind};

use crate::ast::{FnDef, Program, VarType};
use frame::Frame;
use regs::{MAX_PARAMS, param_reg, size_word};
use std::collections::HashMap;

/// The fixed program prologue: the `_start` entry point.
///
/// `_start` receives the initial process stack from the kernel: `[rsp]` is
/// argc, the argv array starts at `rsp + 8`, and envp follows argv and its
/// NULL terminator. The three are marshalled into `rdi`/`rsi`/`rdx` so that
/// `main` sees them as ordinary parameters, and `main`'s return value
/// becomes the status of the exit syscall (60).
const PROGRAM_PROLOGUE: &str = "[bits 64]\n\
segment .text\n\
\tglobal _start\n\
_start:\n\
\tmov rdi, [rsp]\n\
\tlea rsi, [rsp + 8]\n\
\tlea rdx, [rsp + rdi*8+8+8]\n\
\tcall main\n\
\tmov rdi, rax\n\
\tmov rax, 60\n\
\tsyscall\n";

/// NASM code generator for Fenc programs.
///
/// `Codegen` holds the process-wide state of a compilation: the function
/// signature registry and the string-literal pool. Per-function state lives
/// in a [`Frame`] created on entry to each function.
///
/// # Usage
///
/// Create a generator with [`Codegen::new`], passing the built-in assembly
/// text to splice into the output, then call [`Codegen::compile`].
pub struct Codegen {
    /// Global function signature registry: name to ordered parameter types.
    ///
    /// Seeded with the built-in signatures before user functions are
    /// compiled. A user function is added when its compilation starts, so
    /// it is visible to every later call site (including its own body) but
    /// not to earlier ones - forward references are rejected.
    signatures: HashMap<String, Vec<VarType>>,
    /// String literals in first-seen order; index i becomes label `V{i}`.
    strings: Vec<Vec<u8>>,
    /// Verbatim built-in assembly text spliced after the entry stub.
    builtin_asm: String,
}

impl Codegen {
    /// Creates a new code generator.
    ///
    /// # Arguments
    ///
    /// * `builtin_asm` - Assembly text defining the built-in functions,
    ///   spliced verbatim into the text segment. The text is expected to
    ///   define the symbols listed in [`builtins::BUILTIN_NAMES`].
    pub fn new(builtin_asm: impl Into<String>) -> Self {
        let mut builtin_asm = builtin_asm.into();
        if !builtin_asm.is_empty() && !builtin_asm.ends_with('\n') {
            builtin_asm.push('\n');
        }

        Codegen {
            signatures: HashMap::new(),
            strings: Vec::new(),
            builtin_asm,
        }
    }

    /// Compiles a Fenc program to NASM assembly text.
    ///
    /// The output contains three segments in order: `.text` (entry stub,
    /// built-ins, user functions), `.data` (string literals), and an empty
    /// `.bss`. Given identical input, the output is byte-identical.
    ///
    /// # Errors
    ///
    /// Returns an error for any semantic violation: undefined or redeclared
    /// variables, undefined functions, call arity mismatches, or more than
    /// six parameters or arguments.
    pub fn compile(&mut self, program: &Program) -> Result<String, CodegenError> {
        self.signatures.clear();
        self.strings.clear();
        builtins::seed_signatures(&mut self.signatures);

        let mut output = String::from(PROGRAM_PROLOGUE);
        output.push_str(&self.builtin_asm);

        for function in &program.functions {
            output.push_str(&self.compile_function(function)?);
        }

        output.push_str(&self.build_data_segment());
        output.push_str("segment .bss\n");

        Ok(output)
    }

    /// Compiles a single function declaration.
    ///
    /// The body is compiled into a buffer first: the frame size is only
    /// known once every declaration in the body (including those inside
    /// `if`/`while` blocks) has claimed its slot, and the prologue needs
    /// that total for `sub rsp`.
    fn compile_function(&mut self, function: &FnDef) -> Result<String, CodegenError> {
        if function.params.len() > MAX_PARAMS {
            return Err(CodegenError::too_many_parameters(function.span));
        }

        let mut frame = Frame::new();
        let mut body = String::new();

        // Spill parameters to their frame slots in declaration order.
        for (slot, param) in function.params.iter().enumerate() {
            let offset = frame.declare(&param.name, param.ty, param.span)?;
            body.push_str(&format!(
                "\tmov {} [rbp - {}], {}\n",
                size_word(param.ty),
                offset,
                param_reg(param.ty, slot),
            ));
        }

        // Register the signature before compiling the body so that the
        // function can call itself. Later functions see it too; earlier
        // ones already missed it (no forward references).
        let param_types = function.params.iter().map(|param| param.ty).collect();
        self.signatures.insert(function.name.clone(), param_types);

        for stmt in &function.body {
            self.compile_stmt(stmt, &mut frame, &mut body)?;
        }

        let frame_size = frame.size();
        Ok(format!(
            "{}:\n\
             \tpush rbp\n\
             \tmov rbp, rsp\n\
             \tsub rsp, {}\n\
             {}\
             .retpoint:\n\
             \tadd rsp, {}\n\
             \tpop rbp\n\
             \tret\n",
            function.name, frame_size, body, frame_size,
        ))
    }

    /// Builds the `.data` segment from the collected string literals.
    ///
    /// The i-th literal is emitted as `V{i} db 0xHH,...,0x00`: its bytes in
    /// hex followed by a NUL terminator.
    fn build_data_segment(&self) -> String {
        let mut output = String::from("segment .data\n");
        for (index, bytes) in self.strings.iter().enumerate() {
            let mut encoded: Vec<String> =
                bytes.iter().map(|byte| format!("0x{:02x}", byte)).collect();
            encoded.push("0x00".to_string());
            output.push_str(&format!("\tV{} db {}\n", index, encoded.join(",")));
        }
        output
    }
}
