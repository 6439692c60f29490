//! Dotted path resolution against the stash.

use std::borrow::Cow;

use crate::types::{Stash, Value};

/// Resolve a dotted path such as `user.friends.0.name` against the stash.
///
/// Resolution is fail-soft and always produces a value:
/// - a segment starting with `_` is private and resolves to `Null`
/// - on a list, a segment must be a decimal index without leading zeros
/// - on a map, a segment is a key lookup
/// - on an object, a segment is a zero-argument accessor call
/// - anything else (missing keys, scalars, out-of-range indexes) is `Null`
///
/// # Example
///
/// ```
/// use ttiny::{resolve, stash, Value};
///
/// let stash = stash! { "list" => vec!["a", "b"] };
/// assert_eq!(resolve(&stash, "list.1"), Value::from("b"));
/// assert_eq!(resolve(&stash, "list.01"), Value::Null);
/// assert_eq!(resolve(&stash, "missing.key"), Value::Null);
/// ```
pub fn resolve(stash: &Stash, path: &str) -> Value {
    let mut segments = path.split('.');
    let Some(root) = segments
        .next()
        .filter(|first| !is_private(first))
        .and_then(|first| stash.get(first))
    else {
        return Value::Null;
    };

    let mut cursor = Cow::Borrowed(root);
    for segment in segments {
        if is_private(segment) {
            return Value::Null;
        }
        let next = match &cursor {
            Cow::Borrowed(node) => step(*node, segment),
            Cow::Owned(node) => step(node, segment).map(|value| Cow::Owned(value.into_owned())),
        };
        match next {
            Some(node) => cursor = node,
            None => return Value::Null,
        }
    }

    cursor.into_owned()
}

fn is_private(segment: &str) -> bool {
    segment.starts_with('_')
}

/// Take one step down the stash tree, or `None` if the walk ends empty.
fn step<'a>(node: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match node {
        Value::List(items) => parse_index(segment)
            .and_then(|index| items.get(index))
            .map(Cow::Borrowed),
        Value::Map(map) => map.get(segment).map(Cow::Borrowed),
        Value::Object(object) => object.call(segment).map(Cow::Owned),
        _ => None,
    }
}

/// Parse a list index: `0` or a decimal number without a leading zero.
fn parse_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let well_formed = match bytes {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    };
    if well_formed {
        segment.parse().ok()
    } else {
        None
    }
}
