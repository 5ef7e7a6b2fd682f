mod common;

use common::v;
use phi_stdlib::{apply, get, get_or, set, Value};
use serde_json::json;

#[test]
fn get_reads_nested_values() {
    let reader = get(v(json!(["a", "b"])));
    assert_eq!(
        apply(&reader, &[v(json!({"a": {"b": 5}}))]).unwrap(),
        Value::Int(5)
    );
}

#[test]
fn get_answers_the_default_on_absence() {
    let reader = get_or(v(json!(["a", "z"])), Value::Int(-1));
    assert_eq!(
        apply(&reader, &[v(json!({"a": {"b": 5}}))]).unwrap(),
        Value::Int(-1)
    );
    // absence anywhere along the path short-circuits
    let deep = get(v(json!(["x", "y", "z"])));
    assert_eq!(apply(&deep, &[v(json!({"a": 1}))]).unwrap(), Value::None);
}

#[test]
fn get_crosses_mixed_shapes() {
    let xs = v(json!({"rows": [{"name": "ada"}, {"name": "alan"}]}));
    let reader = get(v(json!(["rows", 1, "name"])));
    assert_eq!(apply(&reader, &[xs]).unwrap(), v(json!("alan")));
}

#[test]
fn set_updates_without_mutating_the_input() {
    let orig = v(json!({"a": {"b": 5}}));
    let bump = Value::native("bump", |args| {
        Ok(Value::Int(args[0].as_int().unwrap_or(0) + 1))
    });
    let writer = set(v(json!(["a", "b"])), bump);
    let updated = apply(&writer, &[orig.clone()]).unwrap();
    assert_eq!(updated, v(json!({"a": {"b": 6}})));
    assert_eq!(orig, v(json!({"a": {"b": 5}})));
}

#[test]
fn set_builds_missing_spines_out_of_dicts() {
    let writer = set(
        v(json!(["a", 0, "b"])),
        Value::native("one", |_| Ok(Value::Int(1))),
    );
    let out = apply(&writer, &[v(json!({}))]).unwrap();
    // the integer key lands in a created dict under its decimal form
    assert_eq!(out, v(json!({"a": {"0": {"b": 1}}})));
}

#[test]
fn set_over_lists_replaces_in_place_positionally() {
    let writer = set(
        v(json!([1, "done"])),
        Value::native("yes", |_| Ok(Value::Bool(true))),
    );
    let out = apply(
        &writer,
        &[v(json!([{"done": false}, {"done": false}]))],
    )
    .unwrap();
    assert_eq!(out, v(json!([{"done": false}, {"done": true}])));
}

#[test]
fn set_edits_strings_one_character_at_a_time() {
    let writer = set(
        v(json!(0)),
        Value::native("cap", |args| {
            Ok(Value::string(
                args[0].as_str().unwrap_or_default().to_uppercase(),
            ))
        }),
    );
    assert_eq!(
        apply(&writer, &[v(json!("phi"))]).unwrap(),
        v(json!("Phi"))
    );
}

#[test]
fn string_paths_must_be_single_integers() {
    let writer = set(v(json!("k")), Value::native("x", |_| Ok(v(json!("x")))));
    assert!(apply(&writer, &[v(json!("abc"))]).unwrap_err().is_contract());
}

#[test]
fn invalid_containers_and_paths_are_contract_violations() {
    let reader = get(v(json!("k")));
    assert!(apply(&reader, &[Value::Int(3)]).unwrap_err().is_contract());
    let reader = get(v(json!(true)));
    assert!(apply(&reader, &[v(json!({}))]).unwrap_err().is_contract());
}
