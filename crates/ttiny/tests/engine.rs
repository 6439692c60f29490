//! End-to-end tests for `process` and the `Engine` facade.

use std::io::Write;

use tempfile::NamedTempFile;
use ttiny::{Engine, ParseError, ProcessError, Stash, Value, process, stash};

// =============================================================================
// Conditionals
// =============================================================================

#[test]
fn if_else_branch_selection() {
    let t = "[% IF a.b %]X[% ELSE %]Y[% END %]";
    assert_eq!(process(t, &mut stash! { "a" => stash! { "b" => true } }).unwrap(), "X");
    assert_eq!(process(t, &mut stash! { "a" => stash! { "b" => false } }).unwrap(), "Y");
    assert_eq!(process(t, &mut stash! { "a" => stash! {} }).unwrap(), "Y");
}

#[test]
fn unless_inverts_the_test() {
    let t = "[% UNLESS a %]Y[% END %]";
    assert_eq!(process(t, &mut stash! { "a" => false }).unwrap(), "Y");
    assert_eq!(process(t, &mut stash! { "a" => true }).unwrap(), "");
}

#[test]
fn truthiness_of_conditions() {
    let t = "[% IF v %]y[% ELSE %]n[% END %]";
    let empty: Vec<i64> = Vec::new();
    assert_eq!(process(t, &mut stash! { "v" => empty }).unwrap(), "y");
    assert_eq!(process(t, &mut stash! { "v" => stash! {} }).unwrap(), "y");
    assert_eq!(process(t, &mut stash! { "v" => "" }).unwrap(), "n");
    assert_eq!(process(t, &mut stash! { "v" => "0" }).unwrap(), "y");
    assert_eq!(process(t, &mut stash! { "v" => 0 }).unwrap(), "n");
    assert_eq!(process(t, &mut stash! { "v" => 0.0 }).unwrap(), "n");
    assert_eq!(process(t, &mut stash! { "v" => Value::Null }).unwrap(), "n");
    assert_eq!(process(t, &mut Stash::new()).unwrap(), "n");
}

// =============================================================================
// Loops
// =============================================================================

#[test]
fn loop_expands_in_order() {
    let mut s = stash! { "list" => vec![1, 2, 3] };
    assert_eq!(
        process("[% FOREACH n IN list %][% n %],[% END %]", &mut s).unwrap(),
        "1,2,3,"
    );
}

#[test]
fn non_list_loop_source_renders_nothing() {
    let t = "[% FOREACH n IN x %]Y[% END %]";
    assert_eq!(process(t, &mut stash! { "x" => 5 }).unwrap(), "");
    assert_eq!(process(t, &mut Stash::new()).unwrap(), "");
}

#[test]
fn loop_variable_persists_after_processing() {
    let mut s = stash! { "n" => "outer", "list" => vec![1, 2, 3] };
    process("[% FOREACH n IN list %][% END %]", &mut s).unwrap();
    assert_eq!(s.get("n"), Some(&Value::Number(3)));
}

#[test]
fn nested_loops_see_outer_variables() {
    let mut s = stash! {
        "rows" => vec![vec![1, 0], vec![0, 2]],
    };
    let t = "[% FOREACH row IN rows %][% FOREACH cell IN row %][% UNLESS cell %]-[% ELSE %][% cell %][% END %][% END %]|[% END %]";
    assert_eq!(process(t, &mut s).unwrap(), "1-|-2|");
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn three_levels_of_mixed_nesting() {
    let t = "[% IF show %][% FOREACH u IN users %][% IF u.active %][% u.name %][% ELSE %]([% u.name %])[% END %];[% END %][% ELSE %]hidden[% END %]";
    let users = vec![
        stash! { "name" => "ann", "active" => true },
        stash! { "name" => "bob", "active" => false },
    ];

    let mut s = stash! { "show" => true, "users" => users.clone() };
    assert_eq!(process(t, &mut s).unwrap(), "ann;(bob);");

    let mut s = stash! { "show" => false, "users" => users };
    assert_eq!(process(t, &mut s).unwrap(), "hidden");
}

#[test]
fn inner_loop_inside_unless_inside_loop() {
    let t = "[% FOREACH g IN groups %][% g.name %]:[% UNLESS g.empty %][% FOREACH m IN g.members %][% IF m.lead %]*[% END %][% m.id %],[% END %][% ELSE %]none[% END %]\n[% END %]";
    let mut s = stash! {
        "groups" => vec![
            stash! {
                "name" => "a",
                "empty" => false,
                "members" => vec![
                    stash! { "id" => 1, "lead" => true },
                    stash! { "id" => 2 },
                ],
            },
            stash! { "name" => "b", "empty" => true },
        ],
    };
    insta::assert_snapshot!(process(t, &mut s).unwrap(), @r"
a:*1,2,
b:none
");
}

// =============================================================================
// Substitution
// =============================================================================

#[test]
fn private_keys_are_hidden() {
    let mut s = stash! { "a" => stash! { "_secret" => "s" } };
    assert_eq!(process("[% a._secret %]", &mut s).unwrap(), "");
}

#[test]
fn value_display() {
    let mut s = stash! {
        "t" => true,
        "f" => 1.5,
        "list" => vec![1, 2],
        "map" => stash! { "k" => 1 },
        "none" => Value::Null,
    };
    assert_eq!(
        process("[% t %]|[% f %]|[% list %]|[% map %]|[% none %]|[% missing %]", &mut s)
            .unwrap(),
        "true|1.5|1,2|||"
    );
}

#[test]
fn unknown_tags_pass_through() {
    assert_eq!(
        Engine::new().render("[% Foo %] and [% if x %]").unwrap(),
        "[% Foo %] and [% if x %]"
    );
}

#[test]
fn render_uses_empty_stash() {
    assert_eq!(Engine::new().render("a[% x %]b").unwrap(), "ab");
}

#[test]
fn processing_output_again_is_a_no_op() {
    let t = "[% IF a %][% FOREACH n IN list %]<[% n %]>[% END %][% END %] done";
    let mut s = stash! { "a" => true, "list" => vec!["x", "y"] };
    let once = process(t, &mut s).unwrap();
    let twice = process(&once, &mut s).unwrap();
    assert_eq!(once, "<x><y> done");
    assert_eq!(twice, once);
}

#[test]
fn chomped_list_markup() {
    let t = "<ul>\n[% FOREACH item IN items -%]\n  <li>[% item %]</li>\n[% END -%]\n</ul>\n";
    let mut s = stash! { "items" => vec!["a", "b"] };
    insta::assert_snapshot!(process(t, &mut s).unwrap(), @r"
<ul>
  <li>a</li>
  <li>b</li>
</ul>
");
}

// =============================================================================
// Errors and configuration
// =============================================================================

#[test]
fn unterminated_block_is_an_error() {
    let err = process("[% IF a %]x", &mut Stash::new()).unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Parse(ParseError::UnterminatedBlock { line: 1, column: 1, .. })
    ));
    assert_eq!(err.to_string(), "unterminated IF block opened at 1:1");
}

#[test]
fn malformed_header_is_an_error() {
    let err = process("[% FOREACH x %][% END %]", &mut Stash::new()).unwrap_err();
    assert!(matches!(err, ProcessError::Parse(ParseError::Syntax { .. })));

    let err = process("ok [% IF Foo %]x[% END %]", &mut Stash::new()).unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Parse(ParseError::Syntax { line: 1, column: 4, .. })
    ));
}

#[test]
fn max_depth_is_configurable() {
    let engine = Engine::builder().max_depth(2).build();
    assert_eq!(engine.max_depth(), 2);
    let t = "[% IF a %][% IF a %][% IF a %]x[% END %][% END %][% END %]";
    let err = engine.process(t, &mut stash! { "a" => true }).unwrap_err();
    assert!(matches!(err, ProcessError::MaxDepthExceeded { max_depth: 2 }));

    assert_eq!(Engine::new().process(t, &mut stash! { "a" => true }).unwrap(), "x");
}

#[test]
fn deep_nesting_renders_with_defaults() {
    let depth = 200;
    let t = format!("{}x{}", "[% IF a %]".repeat(depth), "[% END %]".repeat(depth));
    assert_eq!(process(&t, &mut stash! { "a" => true }).unwrap(), "x");
    assert_eq!(process(&t, &mut stash! { "a" => false }).unwrap(), "");
}

#[test]
fn invalid_utf8_is_rejected() {
    let err = Engine::new()
        .process_bytes(&[b'a', 0xff, b'b'], &mut Stash::new())
        .unwrap_err();
    assert!(matches!(err, ProcessError::Parse(ParseError::InvalidUtf8)));
}

#[test]
fn process_file_reads_template() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Hello [% name %]!").unwrap();

    let out = Engine::new()
        .process_file(file.path(), &mut stash! { "name" => "file" })
        .unwrap();
    assert_eq!(out, "Hello file!");
}

#[test]
fn process_file_reports_missing_path() {
    let err = Engine::new()
        .process_file("/nonexistent/template.tt", &mut Stash::new())
        .unwrap_err();
    match err {
        ProcessError::Io { path, .. } => {
            assert_eq!(path.to_str(), Some("/nonexistent/template.tt"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}
