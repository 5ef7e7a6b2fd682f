//! Sequence access and restructuring, uniform over Strings and Lists
//! (Dicts where noted). Strings are treated as sequences of
//! single-character strings throughout.

use std::cmp::Ordering;

use phi_core::{CallSite, PhiError, Value};

use crate::func::call;

/// Element count: characters for a String, entries for a List/Dict.
#[track_caller]
pub fn len(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(items) => Ok(Value::Int(items.len() as i64)),
        Value::Dict(map) => Ok(Value::Int(map.len() as i64)),
        other => Err(PhiError::contract(
            "len",
            1,
            "expected a list/dict or string",
            other,
        )),
    }
}

#[track_caller]
pub fn reverse(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::String(s) => Ok(Value::string(s.chars().rev().collect::<String>())),
        Value::List(items) => {
            let mut out = items.as_ref().clone();
            out.reverse();
            Ok(Value::list(out))
        }
        other => Err(PhiError::contract(
            "reverse",
            1,
            "expected a list or string",
            other,
        )),
    }
}

#[track_caller]
fn edge(xs: &Value, callee: &'static str, need: usize) -> Result<Vec<Value>, PhiError> {
    let items = match xs {
        Value::String(s) => s.chars().map(|c| Value::string(c.to_string())).collect(),
        Value::List(items) => items.as_ref().clone(),
        other => {
            return Err(PhiError::contract(
                callee,
                1,
                "expected a list or string",
                other,
            ))
        }
    };
    if items.len() < need {
        return Err(PhiError::contract(
            callee,
            1,
            format!("expected a list or string of at least {need} element(s)"),
            xs,
        ));
    }
    Ok(items)
}

/// First element. Empty input is a contract violation.
#[track_caller]
pub fn head(xs: &Value) -> Result<Value, PhiError> {
    Ok(edge(xs, "head", 1)?.swap_remove(0))
}

/// Second element. Fewer than two elements is a contract violation.
#[track_caller]
pub fn snd(xs: &Value) -> Result<Value, PhiError> {
    Ok(edge(xs, "snd", 2)?.swap_remove(1))
}

/// Last element. Empty input is a contract violation.
#[track_caller]
pub fn last(xs: &Value) -> Result<Value, PhiError> {
    let mut items = edge(xs, "last", 1)?;
    Ok(items.remove(items.len() - 1))
}

/// Everything after the first element; empty input yields empty.
#[track_caller]
pub fn tail(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::String(s) => Ok(Value::string(s.chars().skip(1).collect::<String>())),
        Value::List(items) => Ok(Value::list(
            items.iter().skip(1).cloned().collect(),
        )),
        other => Err(PhiError::contract(
            "tail",
            1,
            "expected a list or string",
            other,
        )),
    }
}

/// Everything before the last element; empty input yields empty.
#[track_caller]
pub fn init(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::String(s) => {
            let n = s.chars().count().saturating_sub(1);
            Ok(Value::string(s.chars().take(n).collect::<String>()))
        }
        Value::List(items) => {
            let n = items.len().saturating_sub(1);
            Ok(Value::list(items[..n].to_vec()))
        }
        other => Err(PhiError::contract(
            "init",
            1,
            "expected a list or string",
            other,
        )),
    }
}

/// The keys of a container: `0..n-1` for a List, key strings for a Dict.
#[track_caller]
pub fn keys(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::List(items) => Ok(Value::list(
            (0..items.len() as i64).map(Value::Int).collect(),
        )),
        Value::Dict(map) => Ok(Value::list(
            map.keys().map(|k| Value::string(k.clone())).collect(),
        )),
        other => Err(PhiError::contract(
            "keys",
            1,
            "expected a list or dict",
            other,
        )),
    }
}

/// The values of a container, re-indexed as a List.
#[track_caller]
pub fn vals(xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::List(items) => Ok(Value::list(items.as_ref().clone())),
        Value::Dict(map) => Ok(Value::list(map.values().cloned().collect())),
        other => Err(PhiError::contract(
            "vals",
            1,
            "expected a list or dict",
            other,
        )),
    }
}

/// The key of the first entry strictly equal to `needle`: an Int index for
/// a List, a String key for a Dict, `None` when absent.
#[track_caller]
pub fn find_key(needle: &Value, xs: &Value) -> Result<Value, PhiError> {
    match xs {
        Value::List(items) => Ok(items
            .iter()
            .position(|v| v == needle)
            .map(|i| Value::Int(i as i64))
            .unwrap_or(Value::None)),
        Value::Dict(map) => Ok(map
            .iter()
            .find(|(_, v)| *v == needle)
            .map(|(k, _)| Value::string(k.clone()))
            .unwrap_or(Value::None)),
        other => Err(PhiError::contract(
            "find_key",
            2,
            "expected a list or dict",
            other,
        )),
    }
}

/// `slice(length, offset)(xs)`: a window of at most `length` entries
/// starting at `offset`. Works over Strings, Lists, and Dicts (whose
/// entries keep their keys).
#[track_caller]
pub fn slice(length: i64, offset: i64) -> Value {
    let site = CallSite::capture();
    Value::native("slice", move |args| {
        if length < 0 {
            return Err(PhiError::contract_at(
                site,
                "slice",
                1,
                "expected a non-negative length",
                &Value::Int(length),
            ));
        }
        if offset < 0 {
            return Err(PhiError::contract_at(
                site,
                "slice",
                2,
                "expected a non-negative offset",
                &Value::Int(offset),
            ));
        }
        let (skip, take) = (offset as usize, length as usize);
        let xs = args.first().cloned().unwrap_or(Value::None);
        match &xs {
            Value::String(s) => Ok(Value::string(
                s.chars().skip(skip).take(take).collect::<String>(),
            )),
            Value::List(items) => Ok(Value::list(
                items.iter().skip(skip).take(take).cloned().collect(),
            )),
            Value::Dict(map) => Ok(Value::dict(
                map.iter()
                    .skip(skip)
                    .take(take)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )),
            other => Err(PhiError::contract_at(
                site,
                "slice",
                3,
                "expected a list/dict or string",
                other,
            )),
        }
    })
}

/// `chunk(n)(xs)`: consecutive groups of `n`, the last possibly shorter.
#[track_caller]
pub fn chunk(n: i64) -> Value {
    let site = CallSite::capture();
    Value::native("chunk", move |args| {
        if n <= 0 {
            return Err(PhiError::contract_at(
                site,
                "chunk",
                1,
                "expected a positive group size",
                &Value::Int(n),
            ));
        }
        let size = n as usize;
        let xs = args.first().cloned().unwrap_or(Value::None);
        match &xs {
            Value::String(s) => {
                let chars: Vec<char> = s.chars().collect();
                Ok(Value::list(
                    chars
                        .chunks(size)
                        .map(|group| Value::string(group.iter().collect::<String>()))
                        .collect(),
                ))
            }
            Value::List(items) => Ok(Value::list(
                items
                    .chunks(size)
                    .map(|group| Value::list(group.to_vec()))
                    .collect(),
            )),
            other => Err(PhiError::contract_at(
                site,
                "chunk",
                2,
                "expected a list or string",
                other,
            )),
        }
    })
}

/// `sort_by(cmp)(xs)`: stable sort of a List with a three-way comparator.
/// The comparator answers a negative/zero/positive Int (a Bool is read as
/// less/greater).
#[track_caller]
pub fn sort_by(cmp: Value) -> Value {
    let site = CallSite::capture();
    Value::native("sort_by", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        let Value::List(items) = &xs else {
            return Err(PhiError::contract_at(
                site,
                "sort_by",
                2,
                "expected a list",
                &xs,
            ));
        };
        let mut out = items.as_ref().clone();
        let mut err = None;
        out.sort_by(|a, b| {
            if err.is_some() {
                return Ordering::Equal;
            }
            match call(&cmp, &[a.clone(), b.clone()], "sort_by", 1, site) {
                Ok(Value::Int(n)) => n.cmp(&0),
                Ok(Value::Bool(true)) => Ordering::Less,
                Ok(Value::Bool(false)) => Ordering::Greater,
                Ok(_) => Ordering::Equal,
                Err(e) => {
                    err = Some(e);
                    Ordering::Equal
                }
            }
        });
        if let Some(e) = err {
            return Err(e);
        }
        Ok(Value::list(out))
    })
}

/// `flat(depth)(xs)`: flatten nested Lists `depth` levels. `depth <= 0`
/// keeps elements as-is.
#[track_caller]
pub fn flat(depth: i64) -> Value {
    let site = CallSite::capture();
    Value::native("flat", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        let Value::List(items) = &xs else {
            return Err(PhiError::contract_at(
                site,
                "flat",
                2,
                "expected a list",
                &xs,
            ));
        };
        fn walk(items: &[Value], depth: i64, out: &mut Vec<Value>) {
            for v in items {
                match v {
                    Value::List(inner) if depth > 0 => walk(inner, depth - 1, out),
                    other => out.push(other.clone()),
                }
            }
        }
        let mut out = Vec::new();
        walk(items, depth, &mut out);
        Ok(Value::list(out))
    })
}
