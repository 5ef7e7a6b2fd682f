use phi_stdlib::{json, Value};

/// Build a phi value from a JSON literal. Objects go through the canonical
/// classification rule, so `json!({"a": 1})` is a Dict and `json!([1])` a
/// List.
pub fn v(j: serde_json::Value) -> Value {
    json::json_to_value(&j)
}
