//! Tests for dotted path resolution.

use ttiny::{StashObject, Value, resolve, stash};

#[derive(Debug)]
struct Counter {
    n: i64,
}

impl StashObject for Counter {
    fn call(&self, name: &str) -> Option<Value> {
        match name {
            "double" => Some(Value::Number(self.n * 2)),
            "next" => Some(Value::object(Counter { n: self.n + 1 })),
            _ => None,
        }
    }

    fn render(&self) -> String {
        format!("Counter({})", self.n)
    }
}

#[test]
fn nested_map_keys() {
    let s = stash! { "a" => stash! { "b" => stash! { "c" => "deep" } } };
    assert_eq!(resolve(&s, "a.b.c"), Value::from("deep"));
}

#[test]
fn partial_path_returns_subtree() {
    let s = stash! { "a" => stash! { "b" => 1 } };
    assert_eq!(resolve(&s, "a"), Value::from(stash! { "b" => 1 }));
}

#[test]
fn missing_keys_degrade_to_null() {
    let s = stash! { "a" => stash! { "b" => 1 } };
    assert_eq!(resolve(&s, "missing"), Value::Null);
    assert_eq!(resolve(&s, "a.x"), Value::Null);
    assert_eq!(resolve(&s, "a.x.y.z"), Value::Null);
}

#[test]
fn private_segments_resolve_to_null() {
    let s = stash! {
        "a" => stash! { "_secret" => "s", "visible" => stash! { "_inner" => 1 } },
        "_top" => 1,
    };
    assert_eq!(resolve(&s, "a._secret"), Value::Null);
    assert_eq!(resolve(&s, "a.visible._inner"), Value::Null);
    assert_eq!(resolve(&s, "_top"), Value::Null);
}

#[test]
fn list_indexes() {
    let s = stash! { "list" => vec![10, 20, 30] };
    assert_eq!(resolve(&s, "list.0"), Value::Number(10));
    assert_eq!(resolve(&s, "list.2"), Value::Number(30));
    assert_eq!(resolve(&s, "list.3"), Value::Null);
}

#[test]
fn malformed_list_indexes_are_null() {
    let s = stash! { "list" => vec![10, 20, 30] };
    assert_eq!(resolve(&s, "list.01"), Value::Null);
    assert_eq!(resolve(&s, "list.first"), Value::Null);
    assert_eq!(resolve(&s, "list.length"), Value::Null);
}

#[test]
fn list_of_maps() {
    let s = stash! {
        "users" => vec![stash! { "name" => "ann" }, stash! { "name" => "bob" }],
    };
    assert_eq!(resolve(&s, "users.1.name"), Value::from("bob"));
}

#[test]
fn scalars_have_no_members() {
    let s = stash! { "n" => 5, "s" => "text", "z" => 0, "f" => false };
    assert_eq!(resolve(&s, "n.x"), Value::Null);
    assert_eq!(resolve(&s, "s.len"), Value::Null);
    assert_eq!(resolve(&s, "z.x"), Value::Null);
    assert_eq!(resolve(&s, "f.x"), Value::Null);
}

#[test]
fn object_accessors_are_called() {
    let s = stash! { "c" => Value::object(Counter { n: 1 }) };
    assert_eq!(resolve(&s, "c.double"), Value::Number(2));
    assert_eq!(resolve(&s, "c.next.next.double"), Value::Number(6));
    assert_eq!(resolve(&s, "c.missing"), Value::Null);
    assert_eq!(resolve(&s, "c.next").to_string(), "Counter(2)");
}

#[test]
fn empty_segments_are_null() {
    let s = stash! { "a" => stash! { "b" => 1 } };
    assert_eq!(resolve(&s, "a..b"), Value::Null);
    assert_eq!(resolve(&s, ""), Value::Null);
}
