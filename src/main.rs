//! The Fenc programming language compiler CLI.
//!
//! This binary compiles a Fenc source file to NASM x86_64 assembly text,
//! written to standard output by default. Assembling and linking the result
//! (e.g., `nasm -f elf64` followed by `ld`) is left to an external
//! toolchain.

use clap::Parser;
use std::path::Path;

mod diagnostics;
mod driver;

/// Command-line interface for the Fenc compiler.
#[derive(Parser)]
#[command(name = "fenc")]
#[command(about = "The Fenc programming language compiler", long_about = None)]
struct Cli {
    /// The source file to compile (e.g., `hello.fnc`).
    file: String,

    /// Output path for the assembly text.
    /// If not specified, the assembly is written to standard output.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Directory containing the built-in assembly stubs.
    #[arg(long = "builtin-dir", default_value = fenc::codegen::builtins::BUILTIN_DIR)]
    builtin_dir: String,
}

/// Entry point for the Fenc compiler.
fn main() {
    let cli = Cli::parse();

    if let Err(error) = driver::build(
        &cli.file,
        cli.output.as_deref(),
        Path::new(&cli.builtin_dir),
    ) {
        report_and_exit(*error);
    }
}

fn report_and_exit(error: driver::CompileErrorWithContext) -> ! {
    diagnostics::report_error(error.filename(), error.source(), error.error());
    std::process::exit(1);
}
