//! Tag lexer for ttiny templates.
//!
//! Splits template text into literal runs and `[% ... %]` tags, applying the
//! `-`/`+` chomp modifiers as it goes. The token types are public so that
//! tooling can inspect templates without rendering them.

pub mod ast;
pub mod error;
mod lexer;

pub use ast::*;
pub use error::ParseError;
pub use lexer::{is_path, is_var, lex};
