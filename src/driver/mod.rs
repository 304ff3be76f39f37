//! Compilation driver: orchestrates the pipeline from source file to
//! emitted assembly.
//!
//! The driver owns everything that touches the filesystem: reading the
//! source file, reading the built-in assembly stubs, and routing the output
//! to a file or standard output. Sources are read as raw bytes - a Fenc
//! string literal may contain any byte, so the file need not be valid
//! UTF-8. The pipeline itself (lex, parse, codegen) stays pure so it can
//! be exercised without any files.

use fenc::codegen::{Codegen, CodegenError, builtins};
use fenc::lexer::{LexError, Lexer};
use fenc::parser::{ParseError, Parser};
use std::io::Write;
use std::path::Path;

/// A compilation error from any phase of the compiler.
///
/// This enum unifies errors from lexing, parsing, code generation, and I/O
/// to simplify error handling in the build pipeline.
pub(crate) enum CompileError {
    /// An error during lexical analysis.
    Lex(LexError),
    /// An error during parsing.
    Parse(ParseError),
    /// An error during code generation (including semantic checks).
    Codegen(CodegenError),
    /// Failed to read the source file.
    FileRead {
        path: String,
        source: std::io::Error,
    },
    /// Failed to read a built-in assembly stub.
    BuiltinRead {
        path: String,
        source: std::io::Error,
    },
    /// Failed to write the emitted assembly.
    OutputWrite {
        path: String,
        source: std::io::Error,
    },
}

impl CompileError {
    fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        CompileError::FileRead {
            path: path.into(),
            source,
        }
    }

    fn builtin_read(path: impl Into<String>, source: std::io::Error) -> Self {
        CompileError::BuiltinRead {
            path: path.into(),
            source,
        }
    }

    fn output_write(path: impl Into<String>, source: std::io::Error) -> Self {
        CompileError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Codegen(e) => write!(f, "{}", e),
            CompileError::FileRead { path, source } => {
                write!(f, "Failed to read file '{}': {}", path, source)
            }
            CompileError::BuiltinRead { path, source } => {
                write!(f, "Failed to read builtin '{}': {}", path, source)
            }
            CompileError::OutputWrite { path, source } => {
                write!(f, "Failed to write output '{}': {}", path, source)
            }
        }
    }
}

/// Context needed for reporting errors against a source file.
#[derive(Clone)]
struct CompileContext {
    filename: String,
    source: Vec<u8>,
}

impl CompileContext {
    fn new(filename: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            source: source.into(),
        }
    }

    /// Combines this context with an error to create a reportable error.
    fn with_error(self, error: CompileError) -> CompileErrorWithContext {
        CompileErrorWithContext {
            context: self,
            error,
        }
    }
}

/// A compilation error with the context needed for reporting.
pub(crate) struct CompileErrorWithContext {
    context: CompileContext,
    error: CompileError,
}

impl CompileErrorWithContext {
    pub(crate) fn filename(&self) -> &str {
        &self.context.filename
    }

    pub(crate) fn source(&self) -> &[u8] {
        &self.context.source
    }

    pub(crate) fn error(&self) -> &CompileError {
        &self.error
    }
}

/// Reads and concatenates the built-in assembly stubs from `dir`.
///
/// The files are spliced in the order of
/// [`BUILTIN_SOURCES`](builtins::BUILTIN_SOURCES); a missing newline at the
/// end of a stub is repaired so the next one starts on its own line.
fn load_builtins(dir: &Path) -> Result<String, CompileError> {
    let mut text = String::new();
    for name in builtins::BUILTIN_SOURCES {
        let path = dir.join(name);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CompileError::builtin_read(path.display().to_string(), e))?;
        text.push_str(&content);
        if !text.ends_with('\n') {
            text.push('\n');
        }
    }
    Ok(text)
}

/// Runs the pure compilation pipeline on already-loaded source bytes.
fn compile_source(source: &[u8], builtin_asm: String) -> Result<String, CompileError> {
    let tokens = Lexer::new(source).tokenize().map_err(CompileError::Lex)?;
    let program = Parser::new(tokens).parse().map_err(CompileError::Parse)?;
    Codegen::new(builtin_asm)
        .compile(&program)
        .map_err(CompileError::Codegen)
}

/// Compiles a Fenc source file and routes the assembly to its destination.
///
/// This function orchestrates the entire pipeline:
///
/// 1. Read the source file as raw bytes
/// 2. Read the built-in assembly stubs from `builtin_dir`
/// 3. Lex, parse, and generate assembly
/// 4. Write the assembly to `output`, or standard output when `None`
///
/// This function is pure with respect to reporting - rendering the error is
/// the caller's responsibility.
///
/// # Errors
///
/// Returns the first error of any phase, boxed with the filename and source
/// bytes needed to render a diagnostic.
pub(crate) fn build(
    file: &str,
    output: Option<&str>,
    builtin_dir: &Path,
) -> Result<(), Box<CompileErrorWithContext>> {
    let source = std::fs::read(file).map_err(|e| {
        Box::new(
            CompileContext::new(file, Vec::new()).with_error(CompileError::file_read(file, e)),
        )
    })?;
    let context = CompileContext::new(file, source.as_slice());

    let builtin_asm =
        load_builtins(builtin_dir).map_err(|e| Box::new(context.clone().with_error(e)))?;

    let assembly = compile_source(&source, builtin_asm)
        .map_err(|e| Box::new(context.clone().with_error(e)))?;

    match output {
        Some(path) => std::fs::write(path, &assembly)
            .map_err(|e| Box::new(context.with_error(CompileError::output_write(path, e))))?,
        None => std::io::stdout()
            .write_all(assembly.as_bytes())
            .map_err(|e| {
                Box::new(context.with_error(CompileError::output_write("standard output", e)))
            })?,
    }

    Ok(())
}
