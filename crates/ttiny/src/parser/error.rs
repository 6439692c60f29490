//! Parse error types for ttiny.

use thiserror::Error;

/// An error that occurred while reading template markup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A control block that is never closed by `[% END %]`.
    #[error("unterminated {keyword} block opened at {line}:{column}")]
    UnterminatedBlock {
        keyword: String,
        line: usize,
        column: usize,
    },

    /// Invalid UTF-8 in input.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,
}

impl ParseError {
    /// The 1-based line and column of the error, if it has one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Syntax { line, column, .. }
            | ParseError::UnterminatedBlock { line, column, .. } => Some((*line, *column)),
            ParseError::InvalidUtf8 => None,
        }
    }
}

/// Calculate line and column of a byte offset into `source`.
pub(crate) fn calculate_position(source: &str, offset: usize) -> (usize, usize) {
    let consumed = &source[..offset.min(source.len())];
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}
