//! ttiny interpreter for rendering templates.
//!
//! Rendering happens in two stages. The disambiguator rewrites the template
//! until every control block carries a correlation id on its open, `ELSE` and
//! `END` tags; the block resolver then expands those blocks against the stash
//! and substitutes bare path expressions.

mod context;
mod disambiguator;
mod engine;
mod error;
mod path;
mod resolver;

pub use context::{DEFAULT_MAX_DEPTH, ResolveContext};
pub use disambiguator::{Disambiguated, disambiguate};
pub use engine::Engine;
pub use error::ProcessError;
pub use path::resolve;
pub use resolver::{resolve_blocks, resolve_text};
