//! Template lexer using winnow.
//!
//! Recognizes:
//! - Bare path expressions: `[% user.name %]`
//! - Control tags: `[% IF x %]`, `[% UNLESS x %]`, `[% FOREACH v IN xs %]`,
//!   `[% ELSE %]`, `[% END %]`
//! - Correlated markers written by the disambiguator: `[% I1 x %]`,
//!   `[% ELSE I1 %]`, `[% END I1 %]`
//! - Chomp modifiers: `[%-`, `-%]`, `[%+`, `+%]`
//!
//! Anything else between `[%` and `%]` is literal text.

use winnow::combinator::{alt, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_until, take_while};

use super::ast::{Header, Tag, Token, TokenKind};
use super::error::{ParseError, calculate_position};
use crate::types::{BlockKind, CorrelationId};

/// A tag as it appears in the source, before chomping is applied.
struct RawTag {
    tag: Result<Tag, String>,
    chomp_left: bool,
}

enum Piece<'i> {
    Literal(&'i str),
    Tag(RawTag),
}

/// Lex template text into literal and tag tokens.
///
/// Chomp modifiers are applied to the surrounding literals, so the tokens
/// re-render as canonical markup without them.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] for a control tag whose header does not
/// match `IF <path>`, `UNLESS <path>` or `FOREACH <var> IN <path>`.
pub fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut remaining = input;
    let mut tokens: Vec<Token> = Vec::new();

    while !remaining.is_empty() {
        let offset = input.len() - remaining.len();
        let piece = piece(&mut remaining)
            .map_err(|e| syntax_error(input, offset, format!("parse error: {e}")))?;
        match piece {
            Piece::Literal(text) => push_literal(&mut tokens, text, offset),
            Piece::Tag(raw) => {
                let tag = raw
                    .tag
                    .map_err(|message| syntax_error(input, offset, message))?;
                if raw.chomp_left {
                    chomp_preceding(&mut tokens);
                }
                tokens.push(Token {
                    kind: TokenKind::Tag(tag),
                    offset,
                });
            }
        }
    }

    Ok(tokens)
}

fn syntax_error(input: &str, offset: usize, message: String) -> ParseError {
    let (line, column) = calculate_position(input, offset);
    ParseError::Syntax {
        line,
        column,
        message,
    }
}

/// Append literal text, merging with a preceding literal.
fn push_literal(tokens: &mut Vec<Token>, text: &str, offset: usize) {
    if let Some(Token {
        kind: TokenKind::Literal(prev),
        ..
    }) = tokens.last_mut()
    {
        prev.push_str(text);
    } else {
        tokens.push(Token {
            kind: TokenKind::Literal(text.to_string()),
            offset,
        });
    }
}

/// Apply `[%-`: drop trailing spaces and tabs of the preceding literal
/// together with one newline, or all of it when it is leading whitespace at
/// the start of input.
fn chomp_preceding(tokens: &mut Vec<Token>) {
    let Some(Token {
        kind: TokenKind::Literal(text),
        offset,
    }) = tokens.last_mut()
    else {
        return;
    };

    let kept = text.trim_end_matches([' ', '\t']).len();
    if text[..kept].ends_with('\n') {
        text.truncate(kept - 1);
    } else if kept == 0 && *offset == 0 {
        text.clear();
    }

    if text.is_empty() {
        tokens.pop();
    }
}

/// Parse a tag or a run of literal text.
fn piece<'i>(input: &mut &'i str) -> ModalResult<Piece<'i>> {
    alt((tag.map(Piece::Tag), literal.map(Piece::Literal))).parse_next(input)
}

/// Parse literal text up to the next `[`, or a lone `[` that does not open
/// a recognized tag.
fn literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((take_till(1.., '['), "[")).parse_next(input)
}

/// Parse a recognized tag, including a `-%]` trailing newline.
fn tag(input: &mut &str) -> ModalResult<RawTag> {
    "[%".parse_next(input)?;
    let open = opt(one_of(['-', '+'])).parse_next(input)?;
    let inner: &str = take_until(0.., "%]").parse_next(input)?;
    "%]".parse_next(input)?;

    let (body, chomp_right) = match inner.strip_suffix('-') {
        Some(body) => (body, true),
        None => (inner.strip_suffix('+').unwrap_or(inner), false),
    };

    let Some(tag) = classify(body.trim()) else {
        return Err(ErrMode::Backtrack(ContextError::new()));
    };

    if chomp_right {
        opt((take_while(0.., [' ', '\t']), '\n'))
            .void()
            .parse_next(input)?;
    }

    Ok(RawTag {
        tag,
        chomp_left: open == Some('-'),
    })
}

/// Classify trimmed tag content.
///
/// Returns `None` when the content is not a tag at all, and `Some(Err(_))`
/// when it opens a control block with a malformed header.
fn classify(body: &str) -> Option<Result<Tag, String>> {
    let words: Vec<&str> = body.split_whitespace().collect();

    if let [keyword, operands @ ..] = words.as_slice() {
        if let Some(kind) = BlockKind::from_keyword(keyword) {
            return Some(parse_header(kind, operands).map(Tag::Open));
        }
        if let Ok(id) = keyword.parse::<CorrelationId>() {
            let header = parse_header(id.kind(), operands).ok()?;
            return Some(Ok(Tag::MarkedOpen { id, header }));
        }
    }

    let tag = match words.as_slice() {
        ["ELSE"] => Tag::Else,
        ["END"] => Tag::End,
        ["ELSE", id] => Tag::MarkedElse(id.parse().ok()?),
        ["END", id] => Tag::MarkedEnd(id.parse().ok()?),
        [path] if is_path(path) => Tag::Expr((*path).to_string()),
        _ => return None,
    };
    Some(Ok(tag))
}

fn parse_header(kind: BlockKind, operands: &[&str]) -> Result<Header, String> {
    match (kind, operands) {
        (BlockKind::Foreach, [var, "IN", expr]) if is_var(var) && is_path(expr) => Ok(Header {
            kind,
            var: Some((*var).to_string()),
            expr: (*expr).to_string(),
        }),
        (BlockKind::Foreach, _) => Err("expected `FOREACH <var> IN <path>`".to_string()),
        (_, [expr]) if is_path(expr) => Ok(Header {
            kind,
            var: None,
            expr: (*expr).to_string(),
        }),
        _ => Err(format!("expected `{kind} <path>`")),
    }
}

/// Whether `s` is a path expression: `[a-z_][A-Za-z0-9_.]*`.
pub fn is_path(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Whether `s` is a loop variable name: `[a-z][A-Za-z0-9_]*`.
pub fn is_var(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
