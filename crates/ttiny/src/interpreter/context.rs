//! Resolution context carried through recursive block evaluation.

use crate::interpreter::ProcessError;
use crate::types::{Stash, Value};

/// Default maximum nesting depth of evaluated blocks.
///
/// Block evaluation recurses once per level, so the bound only has to keep
/// pathological input from exhausting the native stack.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// State shared by every level of block resolution.
///
/// The stash is borrowed mutably for the whole render: `FOREACH` binds its
/// loop variable directly in it, and those bindings are visible to the
/// caller once rendering finishes.
pub struct ResolveContext<'a> {
    /// The stash paths are resolved against.
    stash: &'a mut Stash,
    /// Current block nesting depth.
    depth: usize,
    /// Maximum allowed depth.
    max_depth: usize,
}

impl<'a> ResolveContext<'a> {
    /// Create a context with the default depth limit.
    pub fn new(stash: &'a mut Stash) -> Self {
        Self::with_max_depth(stash, DEFAULT_MAX_DEPTH)
    }

    /// Create a context with a custom depth limit.
    pub fn with_max_depth(stash: &'a mut Stash, max_depth: usize) -> Self {
        Self {
            stash,
            depth: 0,
            max_depth,
        }
    }

    pub fn stash(&self) -> &Stash {
        &*self.stash
    }

    /// Bind a loop variable, replacing any previous binding.
    pub fn bind(&mut self, var: &str, value: Value) {
        self.stash.insert(var, value);
    }

    /// Enter a nested block.
    ///
    /// Returns an error if the maximum depth would be exceeded.
    pub fn enter_block(&mut self) -> Result<(), ProcessError> {
        if self.depth >= self.max_depth {
            return Err(ProcessError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a nested block.
    pub fn leave_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Get current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
