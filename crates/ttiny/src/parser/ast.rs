//! Token types produced by the lexer.

use std::fmt;

use crate::types::{BlockKind, CorrelationId};

/// A lexed piece of template text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the lexed text.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Literal text, already trimmed by any adjacent chomp modifiers.
    Literal(String),
    /// A recognized tag.
    Tag(Tag),
}

impl Token {
    /// The tag this token carries, if it is one.
    pub fn tag(&self) -> Option<&Tag> {
        match &self.kind {
            TokenKind::Tag(tag) => Some(tag),
            TokenKind::Literal(_) => None,
        }
    }
}

/// A recognized `[% ... %]` tag.
///
/// The `Marked*` variants only appear once the disambiguator has tied a
/// control block together with a correlation id.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// A bare path expression: `[% user.name %]`
    Expr(String),
    /// A control-open tag not yet correlated: `[% IF x %]`
    Open(Header),
    /// `[% ELSE %]`
    Else,
    /// `[% END %]`
    End,
    /// A correlated control-open tag: `[% I1 x %]`
    MarkedOpen { id: CorrelationId, header: Header },
    /// A correlated else: `[% ELSE I1 %]`
    MarkedElse(CorrelationId),
    /// A correlated end: `[% END I1 %]`
    MarkedEnd(CorrelationId),
}

/// The header of a control-open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kind: BlockKind,
    /// The loop variable of a `FOREACH`.
    pub var: Option<String>,
    /// The path expression tested or iterated.
    pub expr: String,
}

impl Header {
    /// Writes `var IN expr` or `expr`.
    fn fmt_operands(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.var {
            Some(var) => write!(f, "{var} IN {}", self.expr),
            None => f.write_str(&self.expr),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.kind)?;
        self.fmt_operands(f)
    }
}

/// Tags display as their canonical markup, without chomp modifiers.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Expr(path) => write!(f, "[% {path} %]"),
            Tag::Open(header) => write!(f, "[% {header} %]"),
            Tag::Else => f.write_str("[% ELSE %]"),
            Tag::End => f.write_str("[% END %]"),
            Tag::MarkedOpen { id, header } => {
                write!(f, "[% {id} ")?;
                header.fmt_operands(f)?;
                f.write_str(" %]")
            }
            Tag::MarkedElse(id) => write!(f, "[% ELSE {id} %]"),
            Tag::MarkedEnd(id) => write!(f, "[% END {id} %]"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Literal(text) => f.write_str(text),
            TokenKind::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// Render tokens back into template text.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}
