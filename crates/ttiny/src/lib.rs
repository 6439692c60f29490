//! A minimal `[% ... %]` text-template engine.
//!
//! Templates mix literal text with tags: bare path expressions
//! (`[% user.name %]`), conditionals (`IF`, `UNLESS`, with optional `ELSE`)
//! and loops (`FOREACH item IN items`), all closed by `[% END %]`. Tags are
//! resolved against a [`Stash`].
//!
//! ```
//! use ttiny::stash;
//!
//! let mut stash = stash! {
//!     "user" => stash! { "name" => "Ada", "admin" => true },
//! };
//! let out = ttiny::process(
//!     "Hi [% user.name %][% IF user.admin %] (admin)[% END %]",
//!     &mut stash,
//! )
//! .unwrap();
//! assert_eq!(out, "Hi Ada (admin)");
//! ```

pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    Disambiguated, Engine, ProcessError, ResolveContext, disambiguate, resolve, resolve_blocks,
};
pub use parser::ParseError;
pub use types::{BlockKind, CorrelationId, Stash, StashObject, Value};

/// Render `template` against `stash` with a default [`Engine`].
///
/// See [`Engine::process`] for which templates are rejected.
pub fn process(template: &str, stash: &mut Stash) -> Result<String, ProcessError> {
    Engine::default().process(template, stash)
}

/// Creates a [`Stash`] from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// booleans, vectors and nested stashes can be passed directly.
///
/// # Example
///
/// ```
/// use ttiny::{stash, Value};
///
/// let s = stash! { "count" => 3, "tags" => vec!["a", "b"] };
/// assert_eq!(s.len(), 2);
/// assert_eq!(s.get("count").and_then(Value::as_number), Some(3));
/// ```
#[macro_export]
macro_rules! stash {
    {} => {
        $crate::Stash::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut stash = $crate::Stash::new();
            $(
                stash.insert($key, $value);
            )+
            stash
        }
    };
}
