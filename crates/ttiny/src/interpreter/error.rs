//! Error types for the ttiny interpreter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// An error that stops a template from rendering.
///
/// Missing data never produces an error: absent paths, non-boolean
/// conditions and non-list loop sources all render as empty text.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The template markup is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// File I/O error when reading a template file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Control blocks are nested deeper than the engine allows.
    #[error("maximum block nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },
}
