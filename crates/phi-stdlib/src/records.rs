//! Column extraction over lists of homogeneous records (all Dicts or all
//! Lists).

use phi_core::{CallSite, Dict, PhiError, Value};

fn records<'a>(
    xs: &'a Value,
    callee: &'static str,
    site: CallSite,
) -> Result<&'a [Value], PhiError> {
    let Some(items) = xs.as_list() else {
        return Err(PhiError::contract_at(
            site,
            callee,
            2,
            "expected a list of records",
            xs,
        ));
    };
    let homogeneous =
        items.iter().all(Value::is_dict) || items.iter().all(Value::is_list);
    if !homogeneous {
        return Err(PhiError::contract_at(
            site,
            callee,
            2,
            "expected a list of homogeneous dicts or lists",
            xs,
        ));
    }
    Ok(items)
}

fn project(record: &Value, key: &Value) -> Option<Value> {
    match record {
        Value::Dict(map) => key.as_key_name().and_then(|name| map.get(&name).cloned()),
        Value::List(items) => key
            .as_key_index()
            .and_then(|idx| items.get(idx).cloned()),
        _ => None,
    }
}

/// `pluck(key)(xs)`: one column of a record list as a flat List. Records
/// lacking the key are skipped.
#[track_caller]
pub fn pluck(key: Value) -> Value {
    let site = CallSite::capture();
    Value::native("pluck", move |args| {
        if key.as_key_name().is_none() {
            return Err(PhiError::contract_at(
                site,
                "pluck",
                1,
                "expected an integer or string key",
                &key,
            ));
        }
        let xs = args.first().cloned().unwrap_or(Value::None);
        let items = records(&xs, "pluck", site)?;
        Ok(Value::list(
            items.iter().filter_map(|r| project(r, &key)).collect(),
        ))
    })
}

/// `pick(keys)(xs)`: a List of filtered records, each retaining only the
/// requested keys (in request order). Dict records stay Dicts, List
/// records become re-indexed Lists of the addressed values.
#[track_caller]
pub fn pick(keys: Value) -> Value {
    let site = CallSite::capture();
    Value::native("pick", move |args| {
        let Some(wanted) = keys.as_list() else {
            return Err(PhiError::contract_at(
                site,
                "pick",
                1,
                "expected a list of integer or string keys",
                &keys,
            ));
        };
        for k in wanted {
            if k.as_key_name().is_none() {
                return Err(PhiError::contract_at(
                    site,
                    "pick",
                    1,
                    "expected an integer or string key",
                    k,
                ));
            }
        }
        let xs = args.first().cloned().unwrap_or(Value::None);
        let items = records(&xs, "pick", site)?;
        let picked = items
            .iter()
            .map(|record| match record {
                Value::Dict(_) => {
                    let mut out = Dict::new();
                    for k in wanted {
                        if let (Some(name), Some(v)) = (k.as_key_name(), project(record, k)) {
                            out.insert(name, v);
                        }
                    }
                    Value::dict(out)
                }
                _ => Value::list(wanted.iter().filter_map(|k| project(record, k)).collect()),
            })
            .collect();
        Ok(Value::list(picked))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::apply;

    fn row(name: &str, age: i64) -> Value {
        let mut map = Dict::new();
        map.insert("name".to_string(), Value::string(name));
        map.insert("age".to_string(), Value::Int(age));
        Value::dict(map)
    }

    #[test]
    fn pluck_extracts_one_column() {
        let table = Value::list(vec![row("ada", 36), row("alan", 41)]);
        let out = apply(&pluck(Value::string("name")), &[table]).unwrap();
        assert_eq!(
            out,
            Value::list(vec![Value::string("ada"), Value::string("alan")])
        );
    }

    #[test]
    fn pluck_skips_records_without_the_key() {
        let mut bare = Dict::new();
        bare.insert("age".to_string(), Value::Int(9));
        let table = Value::list(vec![row("ada", 36), Value::dict(bare)]);
        let out = apply(&pluck(Value::string("name")), &[table]).unwrap();
        assert_eq!(out, Value::list(vec![Value::string("ada")]));
    }

    #[test]
    fn pluck_indexes_list_records() {
        let table = Value::list(vec![
            Value::list(vec![Value::Int(1), Value::Int(2)]),
            Value::list(vec![Value::Int(3), Value::Int(4)]),
        ]);
        let out = apply(&pluck(Value::Int(1)), &[table]).unwrap();
        assert_eq!(out, Value::list(vec![Value::Int(2), Value::Int(4)]));
    }

    #[test]
    fn pluck_rejects_bad_keys_and_mixed_records() {
        let table = Value::list(vec![row("ada", 36)]);
        assert!(apply(&pluck(Value::Bool(true)), &[table.clone()])
            .unwrap_err()
            .is_contract());
        let mixed = Value::list(vec![row("ada", 36), Value::list(vec![])]);
        assert!(apply(&pluck(Value::string("name")), &[mixed])
            .unwrap_err()
            .is_contract());
    }

    #[test]
    fn pick_filters_each_record_to_the_requested_keys() {
        let table = Value::list(vec![row("ada", 36), row("alan", 41)]);
        let out = apply(
            &pick(Value::list(vec![Value::string("age")])),
            &[table],
        )
        .unwrap();
        let mut first = Dict::new();
        first.insert("age".to_string(), Value::Int(36));
        let mut second = Dict::new();
        second.insert("age".to_string(), Value::Int(41));
        assert_eq!(
            out,
            Value::list(vec![Value::dict(first), Value::dict(second)])
        );
    }

    #[test]
    fn pick_requires_a_key_list() {
        let table = Value::list(vec![row("ada", 36)]);
        assert!(apply(&pick(Value::string("age")), &[table])
            .unwrap_err()
            .is_contract());
    }
}
