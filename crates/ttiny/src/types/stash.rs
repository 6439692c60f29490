use std::collections::HashMap;

use serde::Deserialize;

use super::Value;

/// The root mapping a template is rendered against.
///
/// The engine only ever writes to the stash to bind `FOREACH` loop
/// variables; those bindings outlive the call that made them.
///
/// # Example
///
/// ```
/// use ttiny::{stash, Stash, Value};
///
/// let mut stash = Stash::new();
/// stash.insert("name", "Alice");
/// assert_eq!(stash.get("name"), Some(&Value::from("Alice")));
///
/// let same = stash! { "name" => "Alice" };
/// assert_eq!(stash, same);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Stash {
    vars: HashMap<String, Value>,
}

impl Stash {
    /// Create an empty stash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a top-level variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Bind a top-level variable, returning the previous binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    /// Remove a top-level variable.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.vars.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Consume the stash, returning the underlying map.
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.vars
    }
}

impl From<HashMap<String, Value>> for Stash {
    fn from(vars: HashMap<String, Value>) -> Self {
        Self { vars }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Stash {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Extend<(String, Value)> for Stash {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.vars.extend(iter);
    }
}
