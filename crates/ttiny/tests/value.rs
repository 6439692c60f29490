//! Tests for stash values and their conversions.

use ttiny::{BlockKind, CorrelationId, Stash, Value, resolve, stash};

#[test]
fn truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(!Value::Number(0).is_truthy());
    assert!(Value::Number(-1).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::Float(f64::NAN).is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(Value::from("false").is_truthy());
    assert!(Value::List(vec![]).is_truthy());
    assert!(Value::from(Stash::new()).is_truthy());
}

#[test]
fn display() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Number(-7).to_string(), "-7");
    assert_eq!(Value::Float(2.0).to_string(), "2");
    assert_eq!(Value::Float(0.25).to_string(), "0.25");
    assert_eq!(Value::Float(-0.0).to_string(), "0");
    assert_eq!(Value::Float(1e20).to_string(), "100000000000000000000");
    assert_eq!(Value::Float(1e21).to_string(), "1e+21");
    assert_eq!(Value::Float(-2.5e30).to_string(), "-2.5e+30");
    assert_eq!(Value::Float(0.000001).to_string(), "0.000001");
    assert_eq!(Value::Float(1.5e-7).to_string(), "1.5e-7");
    assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
    assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Value::from(vec![Value::Number(1), Value::Null, "x".into()]).to_string(), "1,,x");
    assert_eq!(Value::from(stash! { "a" => 1 }).to_string(), "");
}

#[test]
fn option_conversion() {
    assert_eq!(Value::from(Some(3)), Value::Number(3));
    assert_eq!(Value::from(None::<i64>), Value::Null);
}

#[test]
fn accessors() {
    let list = Value::from(vec![1, 2]);
    assert_eq!(list.as_list().map(<[Value]>::len), Some(2));
    assert_eq!(Value::from("s").as_string(), Some("s"));
    assert!(Value::from(stash! { "k" => 1 }).as_map().is_some());
    assert!(Value::Null.is_null());
}

#[test]
fn stash_deserializes_from_json() {
    let stash: Stash = serde_json::from_str(
        r#"{
            "a": { "b": [1, 2.5, "x", null, true] },
            "big": 18446744073709551615
        }"#,
    )
    .unwrap();

    assert_eq!(resolve(&stash, "a.b.0"), Value::Number(1));
    assert_eq!(resolve(&stash, "a.b.1"), Value::Float(2.5));
    assert_eq!(resolve(&stash, "a.b.2"), Value::from("x"));
    assert_eq!(resolve(&stash, "a.b.3"), Value::Null);
    assert_eq!(resolve(&stash, "a.b.4"), Value::Bool(true));
    assert!(matches!(resolve(&stash, "big"), Value::Float(_)));
}

#[test]
fn stash_from_iterator() {
    let stash: Stash = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(stash.len(), 2);
    assert_eq!(stash.get("b"), Some(&Value::Number(2)));
}

#[test]
fn stash_insert_and_remove() {
    let mut stash = Stash::new();
    assert!(stash.is_empty());
    assert_eq!(stash.insert("k", 1), None);
    assert_eq!(stash.insert("k", 2), Some(Value::Number(1)));
    assert!(stash.contains_key("k"));
    assert_eq!(stash.remove("k"), Some(Value::Number(2)));
    assert!(stash.is_empty());
}

#[test]
fn correlation_ids_round_trip_through_text() {
    let id = CorrelationId::new(BlockKind::Unless, 12);
    assert_eq!(id.to_string(), "U12");
    assert_eq!("U12".parse::<CorrelationId>(), Ok(id));
    assert!("X1".parse::<CorrelationId>().is_err());
    assert!("I".parse::<CorrelationId>().is_err());
    assert!("I1a".parse::<CorrelationId>().is_err());
    assert!("I+1".parse::<CorrelationId>().is_err());
}

#[test]
fn block_kinds() {
    assert_eq!(BlockKind::from_keyword("FOREACH"), Some(BlockKind::Foreach));
    assert_eq!(BlockKind::from_keyword("foreach"), None);
    assert_eq!(BlockKind::from_prefix('U'), Some(BlockKind::Unless));
    assert_eq!(BlockKind::If.keyword(), "IF");
    assert_eq!(BlockKind::Foreach.prefix(), 'F');
}
