//! Deep reads and copy-on-write deep writes into nested List/Dict/String
//! structures.
//!
//! A path is a single key (non-negative Int or String) or a list of keys.
//! Int keys address Dicts through their decimal form and all-digit String
//! keys address Lists positionally, so the positional reading of numeric
//! keys is the same everywhere. `set` rebuilds the spine of the addressed
//! path and shares every untouched subtree, so the caller's input is never
//! observably changed.

use std::slice;

use phi_core::{CallSite, Dict, PhiError, Value};

use crate::func::call;

fn valid_key(k: &Value) -> bool {
    matches!(k, Value::String(_)) || matches!(k, Value::Int(n) if *n >= 0)
}

fn path_keys(
    path: &Value,
    callee: &'static str,
    site: CallSite,
) -> Result<Vec<Value>, PhiError> {
    match path {
        k if valid_key(k) => Ok(vec![k.clone()]),
        Value::List(items) => {
            for k in items.iter() {
                if !valid_key(k) {
                    return Err(PhiError::contract_at(
                        site,
                        callee,
                        1,
                        "expected string or non-negative integer keys",
                        k,
                    ));
                }
            }
            Ok(items.as_ref().clone())
        }
        other => Err(PhiError::contract_at(
            site,
            callee,
            1,
            "expected a string/integer key or a list of keys",
            other,
        )),
    }
}

/// Deep read, answering `None` when any key along the path is absent.
#[track_caller]
pub fn get(path: Value) -> Value {
    get_impl(path, Value::None, CallSite::capture())
}

/// Deep read with an explicit default for the absent case.
#[track_caller]
pub fn get_or(path: Value, default: Value) -> Value {
    get_impl(path, default, CallSite::capture())
}

fn get_impl(path: Value, default: Value, site: CallSite) -> Value {
    Value::native("get", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        if !xs.is_iterable() {
            return Err(PhiError::contract_at(
                site,
                "get",
                2,
                "expected a list/dict or string",
                &xs,
            ));
        }
        let keys = path_keys(&path, "get", site)?;
        let mut cur = xs;
        for key in &keys {
            match &cur {
                Value::Dict(map) => {
                    let Some(name) = key.as_key_name() else {
                        return Ok(default.clone());
                    };
                    match map.get(&name) {
                        Some(v) => cur = v.clone(),
                        None => return Ok(default.clone()),
                    }
                }
                Value::List(items) => match key.as_key_index() {
                    Some(i) if i < items.len() => cur = items[i].clone(),
                    _ => return Ok(default.clone()),
                },
                Value::String(s) => {
                    let Some(i) = key.as_key_index() else {
                        return Err(PhiError::contract_at(
                            site,
                            "get",
                            1,
                            "expected an integer key when the node is a string",
                            key,
                        ));
                    };
                    match s.chars().nth(i) {
                        Some(c) => cur = Value::string(c.to_string()),
                        None => return Ok(default.clone()),
                    }
                }
                _ => return Ok(default.clone()),
            }
        }
        Ok(cur)
    })
}

/// Deep copy-on-write write: `set(path, updater)(xs)` is a new container
/// where the addressed node has been replaced by `updater(old_or_none)`.
/// Missing intermediate nodes are created as empty Dicts.
#[track_caller]
pub fn set(path: Value, updater: Value) -> Value {
    let site = CallSite::capture();
    Value::native("set", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        if !xs.is_iterable() {
            return Err(PhiError::contract_at(
                site,
                "set",
                3,
                "expected a list/dict or string",
                &xs,
            ));
        }
        let keys = path_keys(&path, "set", site)?;
        tracing::trace!(depth = keys.len(), container = xs.type_name(), "deep write");
        set_in(Some(&xs), &keys, &updater, site)
    })
}

fn set_in(
    node: Option<&Value>,
    keys: &[Value],
    updater: &Value,
    site: CallSite,
) -> Result<Value, PhiError> {
    if keys.is_empty() {
        let old = node.cloned().unwrap_or(Value::None);
        return call(updater, slice::from_ref(&old), "set", 2, site);
    }
    let key = &keys[0];
    match node {
        Some(Value::Dict(map)) => {
            let Some(name) = key.as_key_name() else {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    1,
                    "expected a string/integer key",
                    key,
                ));
            };
            let patched = set_in(map.get(&name), &keys[1..], updater, site)?;
            let mut out = map.as_ref().clone();
            out.insert(name, patched);
            Ok(Value::dict(out))
        }
        Some(Value::List(items)) => {
            let Some(idx) = key.as_key_index() else {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    1,
                    "expected an integer key when the node is a list",
                    key,
                ));
            };
            if idx > items.len() {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    1,
                    "index is past the end of the list node",
                    key,
                ));
            }
            let patched = set_in(items.get(idx), &keys[1..], updater, site)?;
            let mut out = items.as_ref().clone();
            if idx == out.len() {
                out.push(patched);
            } else {
                out[idx] = patched;
            }
            Ok(Value::list(out))
        }
        Some(Value::String(s)) => {
            if keys.len() != 1 {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    1,
                    "expected a single integer key against a string",
                    key,
                ));
            }
            let Some(idx) = key.as_key_index() else {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    1,
                    "expected an integer key when the node is a string",
                    key,
                ));
            };
            let chars: Vec<char> = s.chars().collect();
            if idx > chars.len() {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    1,
                    "index is past the end of the string node",
                    key,
                ));
            }
            let old = chars
                .get(idx)
                .map(|c| Value::string(c.to_string()))
                .unwrap_or(Value::None);
            let patched = call(updater, slice::from_ref(&old), "set", 2, site)?;
            let Value::String(patch) = &patched else {
                return Err(PhiError::contract_at(
                    site,
                    "set",
                    2,
                    "expected the updater to return a string",
                    &patched,
                ));
            };
            let mut out: String = chars[..idx].iter().collect();
            out.push_str(patch);
            if idx < chars.len() {
                out.extend(&chars[idx + 1..]);
            }
            Ok(Value::string(out))
        }
        Some(Value::None) | None => {
            // Absent node: grow an empty dict and keep walking.
            let fresh = Value::dict(Dict::new());
            set_in(Some(&fresh), keys, updater, site)
        }
        Some(other) => Err(PhiError::contract_at(
            site,
            "set",
            3,
            "expected a list/dict or string at the addressed node",
            other,
        )),
    }
}
