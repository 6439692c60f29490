//! Miette diagnostic wrapper for template parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use ttiny::ParseError;

/// A miette-compatible diagnostic for template parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("template error: {message}")]
#[diagnostic(code(ttiny::parse))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (line, column) = err.position().unwrap_or((1, 1));
        let (message, help) = match err {
            ParseError::Syntax { message, .. } => (
                message.clone(),
                Some(
                    "control tags take the form IF <path>, UNLESS <path> or FOREACH <var> IN <path>"
                        .to_string(),
                ),
            ),
            ParseError::UnterminatedBlock { keyword, .. } => (
                format!("{keyword} block is never closed"),
                Some("add a matching [% END %]".to_string()),
            ),
            ParseError::InvalidUtf8 => ("invalid UTF-8".to_string(), None),
        };

        let offset = byte_offset(content, line, column);
        let len = usize::from(offset < content.len());

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, len).into(),
            message,
            help,
        }
    }
}

/// Convert a 1-based line and character column to a byte offset, clamped to
/// the content length.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_start = line_start.min(content.len());
    content[line_start..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(content.len(), |(i, _)| line_start + i)
}
