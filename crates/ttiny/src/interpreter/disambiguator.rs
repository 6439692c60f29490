//! Tag disambiguation.
//!
//! `IF`, `UNLESS` and `FOREACH` blocks share one `[% END %]` tag, so nesting
//! is ambiguous to anything that matches tags lexically. Disambiguation
//! rewrites the template until every block carries a correlation id:
//!
//! ```text
//! [% IF a %][% IF b %]x[% END %][% ELSE %]y[% END %]
//! [% IF a %][% I1 b %]x[% END I1 %][% ELSE %]y[% END %]         (pass 1)
//! [% I2 a %][% I1 b %]x[% END I1 %][% ELSE I2 %]y[% END I2 %]   (pass 2)
//! ```
//!
//! Each pass annotates every innermost block, so a template nested `d`
//! levels deep settles after `d` passes.

use tracing::debug;

use crate::parser::error::calculate_position;
use crate::parser::{Header, ParseError, Tag, Token, TokenKind, lex, render_tokens};
use crate::types::CorrelationId;

/// The result of disambiguating a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Disambiguated {
    /// Template text in which every control block is correlated.
    pub text: String,
    /// Number of rewrite passes that annotated at least one block.
    pub passes: usize,
    /// Correlation ids in allocation order.
    pub ids: Vec<CorrelationId>,
}

/// Rewrite `text` until no uncorrelated control block remains.
///
/// # Errors
///
/// Returns [`ParseError::UnterminatedBlock`] if a control block has no
/// matching `[% END %]`, and [`ParseError::Syntax`] for a malformed control
/// tag or when correlation serials run out. Stray `ELSE` and `END` tags are left as literal markup.
///
/// # Example
///
/// ```
/// use ttiny::disambiguate;
///
/// let result = disambiguate("[% IF a %]x[% ELSE %]y[% END %]").unwrap();
/// assert_eq!(result.text, "[% I1 a %]x[% ELSE I1 %]y[% END I1 %]");
/// assert_eq!(result.passes, 1);
/// ```
pub fn disambiguate(text: &str) -> Result<Disambiguated, ParseError> {
    let mut tokens = lex(text)?;
    check_balanced(text, &tokens)?;

    // Continue numbering after any markers already present in the input.
    let mut last_serial = tokens
        .iter()
        .filter_map(|token| marker_id(token).map(|id| id.serial()))
        .max()
        .unwrap_or(0);
    let mut ids = Vec::new();
    let mut passes = 0;

    let mut source = text.to_owned();

    loop {
        let annotated = rewrite_pass(&source, &mut tokens, &mut last_serial)?;
        let rewritten = render_tokens(&tokens);
        if annotated.is_empty() {
            return Ok(Disambiguated {
                text: rewritten,
                passes,
                ids,
            });
        }

        passes += 1;
        debug!(pass = passes, blocks = annotated.len(), "annotated control blocks");
        ids.extend(annotated);
        tokens = lex(&rewritten)?;
        source = rewritten;
    }
}

fn marker_id(token: &Token) -> Option<CorrelationId> {
    match token.tag()? {
        Tag::MarkedOpen { id, .. } | Tag::MarkedElse(id) | Tag::MarkedEnd(id) => Some(*id),
        _ => None,
    }
}

/// Pair every opener with an `END`, reporting the outermost unmatched one.
fn check_balanced(source: &str, tokens: &[Token]) -> Result<(), ParseError> {
    let mut open: Vec<(&Header, usize)> = Vec::new();
    for token in tokens {
        match token.tag() {
            Some(Tag::Open(header)) => open.push((header, token.offset)),
            Some(Tag::End) => {
                open.pop();
            }
            _ => {}
        }
    }

    match open.first() {
        Some((header, offset)) => {
            let (line, column) = calculate_position(source, *offset);
            Err(ParseError::UnterminatedBlock {
                keyword: header.kind.keyword().to_string(),
                line,
                column,
            })
        }
        None => Ok(()),
    }
}

/// Annotate every innermost uncorrelated block, returning the new ids.
///
/// `source` is the text `tokens` were lexed from.
fn rewrite_pass(
    source: &str,
    tokens: &mut [Token],
    last_serial: &mut u32,
) -> Result<Vec<CorrelationId>, ParseError> {
    let mut annotated = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some(Tag::Open(header)) = tokens[i].tag() else {
            i += 1;
            continue;
        };
        let header = header.clone();
        let Some((else_at, end_at)) = innermost_span(tokens, i) else {
            i += 1;
            continue;
        };

        *last_serial = last_serial.checked_add(1).ok_or_else(|| {
            let (line, column) = calculate_position(source, tokens[i].offset);
            ParseError::Syntax {
                line,
                column,
                message: format!("no correlation id left for {} block", header.kind.keyword()),
            }
        })?;
        let id = CorrelationId::new(header.kind, *last_serial);
        tokens[i].kind = TokenKind::Tag(Tag::MarkedOpen { id, header });
        if let Some(else_at) = else_at {
            tokens[else_at].kind = TokenKind::Tag(Tag::MarkedElse(id));
        }
        tokens[end_at].kind = TokenKind::Tag(Tag::MarkedEnd(id));

        annotated.push(id);
        i = end_at + 1;
    }

    Ok(annotated)
}

/// Find the `ELSE` and `END` of the opener at `open_at`, or `None` if
/// another uncorrelated opener comes first.
fn innermost_span(tokens: &[Token], open_at: usize) -> Option<(Option<usize>, usize)> {
    let mut else_at = None;
    for (j, token) in tokens.iter().enumerate().skip(open_at + 1) {
        match token.tag() {
            Some(Tag::Open(_)) => return None,
            Some(Tag::Else) if else_at.is_none() => else_at = Some(j),
            Some(Tag::End) => return Some((else_at, j)),
            _ => {}
        }
    }
    None
}
