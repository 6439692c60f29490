//! Block resolution for disambiguated templates.
//!
//! Walks the token stream left to right: literals are copied, bare path
//! expressions are substituted, and correlated blocks are located by id and
//! evaluated recursively. Text produced by a substitution is never scanned
//! for tags again.

use tracing::trace;

use crate::interpreter::{ProcessError, ResolveContext, resolve};
use crate::parser::{Header, Tag, Token, TokenKind, lex};
use crate::types::{BlockKind, CorrelationId, Stash, Value};

/// A correlated block located in a token stream.
struct Block<'t> {
    id: CorrelationId,
    header: &'t Header,
    then_branch: &'t [Token],
    else_branch: Option<&'t [Token]>,
    /// Index of the `END` marker.
    end_at: usize,
}

/// Expand the correlated blocks and path expressions of `text`.
///
/// `text` is expected to be the output of
/// [`disambiguate`](crate::disambiguate); uncorrelated control tags render
/// as literal markup.
///
/// # Errors
///
/// Returns [`ProcessError::MaxDepthExceeded`] if blocks nest deeper than
/// [`DEFAULT_MAX_DEPTH`](crate::interpreter::DEFAULT_MAX_DEPTH).
pub fn resolve_blocks(stash: &mut Stash, text: &str) -> Result<String, ProcessError> {
    let mut ctx = ResolveContext::new(stash);
    resolve_text(&mut ctx, text)
}

/// Expand `text` with an existing resolution context.
pub fn resolve_text(ctx: &mut ResolveContext<'_>, text: &str) -> Result<String, ProcessError> {
    let tokens = lex(text)?;
    resolve_tokens(ctx, &tokens)
}

fn resolve_tokens(ctx: &mut ResolveContext<'_>, tokens: &[Token]) -> Result<String, ProcessError> {
    let mut output = String::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match &token.kind {
            TokenKind::Literal(text) => output.push_str(text),
            TokenKind::Tag(Tag::Expr(path)) => {
                output.push_str(&resolve(ctx.stash(), path).to_string());
            }
            TokenKind::Tag(Tag::MarkedOpen { id, header }) => {
                if let Some(block) = find_block(tokens, i, *id, header) {
                    output.push_str(&eval_block(ctx, &block)?);
                    i = block.end_at + 1;
                    continue;
                }
                output.push_str(&token.to_string());
            }
            TokenKind::Tag(other) => output.push_str(&other.to_string()),
        }
        i += 1;
    }

    Ok(output)
}

/// Locate the `ELSE` and `END` markers correlated with the opener at
/// `open_at`.
fn find_block<'t>(
    tokens: &'t [Token],
    open_at: usize,
    id: CorrelationId,
    header: &'t Header,
) -> Option<Block<'t>> {
    let mut else_at = None;
    for (j, token) in tokens.iter().enumerate().skip(open_at + 1) {
        match token.tag() {
            Some(Tag::MarkedElse(other)) if *other == id && else_at.is_none() => {
                else_at = Some(j);
            }
            Some(Tag::MarkedEnd(other)) if *other == id => {
                return Some(Block {
                    id,
                    header,
                    then_branch: &tokens[open_at + 1..else_at.unwrap_or(j)],
                    else_branch: else_at.map(|else_at| &tokens[else_at + 1..j]),
                    end_at: j,
                });
            }
            _ => {}
        }
    }
    None
}

fn eval_block(ctx: &mut ResolveContext<'_>, block: &Block<'_>) -> Result<String, ProcessError> {
    ctx.enter_block()?;
    let result = match block.header.kind {
        BlockKind::If | BlockKind::Unless => eval_condition(ctx, block),
        BlockKind::Foreach => eval_foreach(ctx, block),
    };
    ctx.leave_block();
    result
}

/// `IF` renders its then-branch when the path is truthy, `UNLESS` when it
/// is falsy.
fn eval_condition(ctx: &mut ResolveContext<'_>, block: &Block<'_>) -> Result<String, ProcessError> {
    let truthy = resolve(ctx.stash(), &block.header.expr).is_truthy();
    let take_then = truthy != (block.header.kind == BlockKind::Unless);
    trace!(id = %block.id, expr = %block.header.expr, take_then, "condition");

    if take_then {
        resolve_tokens(ctx, block.then_branch)
    } else {
        match block.else_branch {
            Some(branch) => resolve_tokens(ctx, branch),
            None => Ok(String::new()),
        }
    }
}

/// Render the body once per list element with the loop variable bound.
///
/// Non-list sources render nothing. An `ELSE` branch is never rendered.
fn eval_foreach(ctx: &mut ResolveContext<'_>, block: &Block<'_>) -> Result<String, ProcessError> {
    let (Some(var), Value::List(items)) = (
        block.header.var.as_deref(),
        resolve(ctx.stash(), &block.header.expr),
    ) else {
        trace!(id = %block.id, expr = %block.header.expr, "loop source is not a list");
        return Ok(String::new());
    };
    trace!(id = %block.id, var, items = items.len(), "loop");

    let mut output = String::new();
    for item in items {
        ctx.bind(var, item);
        output.push_str(&resolve_tokens(ctx, block.then_branch)?);
    }
    Ok(output)
}
