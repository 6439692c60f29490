//! The engine facade.

use std::fs;
use std::path::Path;
use std::str;

use bon::Builder;
use tracing::debug;

use crate::interpreter::{DEFAULT_MAX_DEPTH, ProcessError, ResolveContext, disambiguate, resolve_text};
use crate::parser::ParseError;
use crate::types::Stash;

/// Renders templates against a stash.
///
/// An engine holds configuration only; it is cheap to build and can be
/// shared freely. Each call disambiguates the template, then resolves its
/// blocks and path expressions.
///
/// # Example
///
/// ```
/// use ttiny::{stash, Engine};
///
/// let engine = Engine::builder().max_depth(8).build();
/// let mut stash = stash! { "items" => vec!["a", "b"] };
///
/// let out = engine
///     .process("[% FOREACH item IN items %]<[% item %]>[% END %]", &mut stash)
///     .unwrap();
/// assert_eq!(out, "<a><b>");
///
/// // The loop variable stays bound after rendering.
/// assert_eq!(stash.get("item"), Some(&"b".into()));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Engine {
    /// Maximum nesting depth of evaluated blocks.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Engine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Render `template` against `stash`.
    ///
    /// The stash is only modified by `FOREACH` loop-variable bindings, which
    /// remain in place afterwards.
    ///
    /// Control tags are checked strictly: a header that is not a valid path,
    /// such as `[% IF Foo %]` or `[% FOREACH x %]`, fails the whole render
    /// instead of being left in the output as markup. Unrecognized
    /// non-control tags still pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Parse`] for an unterminated or malformed
    /// control block and [`ProcessError::MaxDepthExceeded`] for blocks nested
    /// beyond the configured depth.
    pub fn process(&self, template: &str, stash: &mut Stash) -> Result<String, ProcessError> {
        let disambiguated = disambiguate(template)?;
        debug!(
            blocks = disambiguated.ids.len(),
            passes = disambiguated.passes,
            "disambiguated template"
        );

        let mut ctx = ResolveContext::with_max_depth(stash, self.max_depth);
        resolve_text(&mut ctx, &disambiguated.text)
    }

    /// Render `template` against an empty stash.
    pub fn render(&self, template: &str) -> Result<String, ProcessError> {
        self.process(template, &mut Stash::new())
    }

    /// Render a template given as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUtf8`] if the bytes are not text.
    pub fn process_bytes(&self, template: &[u8], stash: &mut Stash) -> Result<String, ProcessError> {
        let template = str::from_utf8(template).map_err(|_| ParseError::InvalidUtf8)?;
        self.process(template, stash)
    }

    /// Read and render a template file.
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
        stash: &mut Stash,
    ) -> Result<String, ProcessError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ProcessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "read template file");
        self.process_bytes(&bytes, stash)
    }
}
