//! Diagnostic rendering for compile errors.
//!
//! Errors that carry a source span are rendered as [`ariadne`] reports with
//! a labeled snippet of the offending source. Ariadne renders text, but
//! Fenc sources are byte strings: when the source happens to be valid
//! UTF-8 (the overwhelmingly common case) the byte-indexed spans line up
//! with the text exactly, and when it is not, the error falls back to a
//! plain line:column message rather than pointing into a re-encoded copy.
//! Errors without a span (I/O failures) always use the plain form, as does
//! any error whose report itself fails to print.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::driver::CompileError;

fn print_range_report(
    filename: &str,
    source: &str,
    span_range: Range<usize>,
    message: &str,
) -> std::io::Result<()> {
    Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(message)
        .with_label(
            Label::new((filename, span_range))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}

fn report_spanned_error(
    filename: &str,
    source: &[u8],
    span_range: Range<usize>,
    line: usize,
    column: usize,
    message: &str,
) {
    // Only hand ariadne a source that is valid UTF-8; any lossy decoding
    // would shift the byte offsets the spans are measured in.
    let Ok(text) = std::str::from_utf8(source) else {
        eprintln!("Error: {} (at {}:{})", message, line, column);
        return;
    };

    if let Err(report_err) = print_range_report(filename, text, span_range, message) {
        eprintln!("Error: {} (at {}:{})", message, line, column);
        eprintln!("(Failed to display detailed error report: {})", report_err);
    }
}

pub(crate) fn report_error(filename: &str, source: &[u8], error: &CompileError) {
    match error {
        CompileError::Lex(e) => {
            report_spanned_error(
                filename,
                source,
                e.span.start..e.span.end,
                e.span.line,
                e.span.column,
                &e.message,
            );
        }
        CompileError::Parse(e) => {
            report_spanned_error(
                filename,
                source,
                e.span.start..e.span.end,
                e.span.line,
                e.span.column,
                &e.message,
            );
        }
        CompileError::Codegen(e) => {
            if let Some(span) = e.span() {
                report_spanned_error(
                    filename,
                    source,
                    span.start..span.end,
                    span.line,
                    span.column,
                    e.message(),
                );
            } else {
                eprintln!("Error in {}: {}", filename, e.message());
            }
        }
        CompileError::FileRead { .. }
        | CompileError::BuiltinRead { .. }
        | CompileError::OutputWrite { .. } => {
            eprintln!("Error: {}", error);
        }
    }
}
