//! Joining and set-like operations: concat, diff, intersect, uniq, has.
//! Operands must agree on shape family; nothing coerces.

use phi_core::{CallSite, Dict, PhiError, Value};

/// Concatenate same-family operands: text join for Strings, append for
/// Lists, left-to-right merge for Dicts (later keys overwrite, first
/// position wins). No operands joins to `""` by the vacuous all-strings
/// case.
#[track_caller]
pub fn concat(operands: &[Value]) -> Result<Value, PhiError> {
    if operands.iter().all(Value::is_string) {
        let mut out = String::new();
        for op in operands {
            if let Value::String(s) = op {
                out.push_str(s);
            }
        }
        return Ok(Value::string(out));
    }
    if operands.iter().all(Value::is_dict) {
        let mut out = Dict::new();
        for op in operands {
            if let Value::Dict(map) = op {
                for (k, v) in map.iter() {
                    out.insert(k.clone(), v.clone());
                }
            }
        }
        return Ok(Value::dict(out));
    }
    if operands.iter().all(Value::is_list) {
        let mut out = Vec::new();
        for op in operands {
            if let Value::List(items) = op {
                out.extend(items.iter().cloned());
            }
        }
        return Ok(Value::list(out));
    }
    Err(PhiError::contract(
        "concat",
        1,
        "expected all operands of one shape family - list/dict or string",
        &Value::list(operands.to_vec()),
    ))
}

/// `diff(xs)(zs)`: entries of `xs` not present in `zs`. Lists compare by
/// value (each occurrence kept, `xs` order preserved); a Dict entry
/// survives only if its key is absent from `zs` or mapped to a different
/// value there.
#[track_caller]
pub fn diff(xs: Value) -> Value {
    against(xs, "diff", CallSite::capture(), false)
}

/// `intersect(xs)(zs)`: entries of `xs` also present in `zs`, with the
/// same comparison rules as `diff`.
#[track_caller]
pub fn intersect(xs: Value) -> Value {
    against(xs, "intersect", CallSite::capture(), true)
}

fn against(xs: Value, callee: &'static str, site: CallSite, keep_present: bool) -> Value {
    Value::native(callee, move |args| {
        let zs = args.first().cloned().unwrap_or(Value::None);
        match (&xs, &zs) {
            (Value::List(a), Value::List(b)) => Ok(Value::list(
                a.iter()
                    .filter(|v| b.contains(v) == keep_present)
                    .cloned()
                    .collect(),
            )),
            (Value::Dict(a), Value::Dict(b)) => Ok(Value::dict(
                a.iter()
                    .filter(|(k, v)| (b.get(*k) == Some(*v)) == keep_present)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )),
            (Value::List(_) | Value::Dict(_), other) => Err(PhiError::contract_at(
                site,
                callee,
                2,
                "expected the same shape as the configured operand",
                other,
            )),
            (other, _) => Err(PhiError::contract_at(
                site,
                callee,
                1,
                "expected a list or dict",
                other,
            )),
        }
    })
}

/// Drop duplicate values, keeping first occurrences: re-indexed for a
/// List, first key per distinct value for a Dict.
#[track_caller]
pub fn uniq(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::List(items) => {
            let mut seen: Vec<&Value> = Vec::new();
            let mut out = Vec::new();
            for v in items.iter() {
                if !seen.contains(&v) {
                    seen.push(v);
                    out.push(v.clone());
                }
            }
            Ok(Value::list(out))
        }
        Value::Dict(map) => {
            let mut seen: Vec<&Value> = Vec::new();
            let mut out = Dict::new();
            for (k, v) in map.iter() {
                if !seen.contains(&v) {
                    seen.push(v);
                    out.insert(k.clone(), v.clone());
                }
            }
            Ok(Value::dict(out))
        }
        other => Err(PhiError::contract(
            "uniq",
            1,
            "expected a list or dict",
            other,
        )),
    }
}

/// `has(needle)(xs)`: substring test against a String (the needle must be
/// a String then), strict membership against a List.
#[track_caller]
pub fn has(needle: Value) -> Value {
    let site = CallSite::capture();
    Value::native("has", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        match &xs {
            Value::String(s) => match &needle {
                Value::String(sub) => Ok(Value::Bool(s.contains(sub.as_str()))),
                other => Err(PhiError::contract_at(
                    site,
                    "has",
                    1,
                    "expected a string needle when the container is a string",
                    other,
                )),
            },
            Value::List(items) => Ok(Value::Bool(items.contains(&needle))),
            other => Err(PhiError::contract_at(
                site,
                "has",
                2,
                "expected a list or string",
                other,
            )),
        }
    })
}
