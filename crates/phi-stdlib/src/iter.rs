//! Shape-polymorphic iteration: fold and its derivatives.
//!
//! Iteration yields `(key, value)` entries — the index for Lists and
//! Strings (whose elements are single-character strings), the key for
//! Dicts. Callbacks receive `(value, key)` or `(acc, value, key)` and may
//! ignore trailing arguments.

use phi_core::{CallSite, Dict, PhiError, Value};

use crate::func::call;

pub(crate) fn entries(xs: &Value) -> Option<Vec<(Value, Value)>> {
    match xs {
        Value::List(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (Value::Int(i as i64), v.clone()))
                .collect(),
        ),
        Value::Dict(map) => Some(
            map.iter()
                .map(|(k, v)| (Value::string(k.clone()), v.clone()))
                .collect(),
        ),
        Value::String(s) => Some(
            s.chars()
                .enumerate()
                .map(|(i, c)| (Value::Int(i as i64), Value::string(c.to_string())))
                .collect(),
        ),
        _ => None,
    }
}

/// Run `f(value, key)` over every entry for its side effects.
#[track_caller]
pub fn each(f: Value) -> Value {
    let site = CallSite::capture();
    Value::native("each", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        let Some(entries) = entries(&xs) else {
            return Err(PhiError::contract_at(
                site,
                "each",
                2,
                "expected a list/dict or string",
                &xs,
            ));
        };
        for (key, value) in entries {
            call(&f, &[value, key], "each", 1, site)?;
        }
        Ok(Value::None)
    })
}

/// Left-to-right accumulation: `fold(f, seed)(xs)` threads
/// `f(acc, value, key)` over every entry and returns the final accumulator.
/// An empty collection returns the seed untouched.
#[track_caller]
pub fn fold(f: Value, seed: Value) -> Value {
    let site = CallSite::capture();
    Value::native("fold", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        let Some(entries) = entries(&xs) else {
            return Err(PhiError::contract_at(
                site,
                "fold",
                3,
                "expected a list/dict or string",
                &xs,
            ));
        };
        let mut acc = seed.clone();
        for (key, value) in entries {
            acc = call(&f, &[acc, value, key], "fold", 1, site)?;
        }
        Ok(acc)
    })
}

/// `reduce(f)(xs)` is `fold(f, head(xs))(tail(xs))`. The seed comes from
/// the collection, so an empty one is a rule violation, and a Dict has no
/// head to take.
#[track_caller]
pub fn reduce(f: Value) -> Value {
    let site = CallSite::capture();
    Value::native("reduce", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        if xs.is_dict() {
            return Err(PhiError::contract_at(
                site,
                "reduce",
                2,
                "expected a list or string",
                &xs,
            ));
        }
        let Some(entries) = entries(&xs) else {
            return Err(PhiError::contract_at(
                site,
                "reduce",
                2,
                "expected a list or string",
                &xs,
            ));
        };
        let mut iter = entries.into_iter();
        let Some((_, head)) = iter.next() else {
            let mut reason = Dict::new();
            reason.insert("given".to_string(), xs.clone());
            return Err(PhiError::domain_at(
                site,
                "reduce of an empty collection",
                Value::dict(reason),
            ));
        };
        let mut acc = head;
        for (key, value) in iter {
            acc = call(&f, &[acc, value, key], "reduce", 1, site)?;
        }
        Ok(acc)
    })
}

/// Variadic zip-map over Lists: `map(f)(xs, ys, ...)` applies `f` across
/// the i-th element of every operand. Ragged inputs truncate to the
/// shortest.
#[track_caller]
pub fn map(f: Value) -> Value {
    let site = CallSite::capture();
    Value::native("map", move |args| {
        if args.is_empty() {
            return Err(PhiError::contract_at(
                site,
                "map",
                2,
                "expected at least one list",
                &Value::None,
            ));
        }
        let mut lists: Vec<&[Value]> = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            match arg.as_list() {
                Some(items) => lists.push(items),
                None => {
                    return Err(PhiError::contract_at(
                        site,
                        "map",
                        i + 2,
                        "expected a list",
                        arg,
                    ))
                }
            }
        }
        let min_len = lists.iter().map(|l| l.len()).min().unwrap_or(0);
        let mut result = Vec::with_capacity(min_len);
        for n in 0..min_len {
            let row: Vec<Value> = lists.iter().map(|l| l[n].clone()).collect();
            result.push(call(&f, &row, "map", 1, site)?);
        }
        Ok(Value::list(result))
    })
}

/// Keep the entries where `p(value, key)` is truthy. Dicts keep their
/// keys; Lists are re-indexed in their original relative order.
#[track_caller]
pub fn filter(p: Value) -> Value {
    let site = CallSite::capture();
    Value::native("filter", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        match &xs {
            Value::List(items) => {
                let mut kept = Vec::new();
                for (i, v) in items.iter().enumerate() {
                    let verdict =
                        call(&p, &[v.clone(), Value::Int(i as i64)], "filter", 1, site)?;
                    if verdict.is_truthy() {
                        kept.push(v.clone());
                    }
                }
                Ok(Value::list(kept))
            }
            Value::Dict(map) => {
                let mut kept = Dict::new();
                for (k, v) in map.iter() {
                    let verdict =
                        call(&p, &[v.clone(), Value::string(k.clone())], "filter", 1, site)?;
                    if verdict.is_truthy() {
                        kept.insert(k.clone(), v.clone());
                    }
                }
                Ok(Value::dict(kept))
            }
            other => Err(PhiError::contract_at(
                site,
                "filter",
                2,
                "expected a list or dict",
                other,
            )),
        }
    })
}

/// Disjunction over the collection: truthy as soon as `p(value, key)` is.
#[track_caller]
pub fn any(p: Value) -> Value {
    let site = CallSite::capture();
    Value::native("any", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        let Some(entries) = entries(&xs) else {
            return Err(PhiError::contract_at(
                site,
                "any",
                2,
                "expected a list/dict or string",
                &xs,
            ));
        };
        for (key, value) in entries {
            if call(&p, &[value, key], "any", 1, site)?.is_truthy() {
                return Ok(Value::Bool(true));
            }
        }
        Ok(Value::Bool(false))
    })
}

/// Conjunction over the collection: falsy as soon as `p(value, key)` is.
#[track_caller]
pub fn all(p: Value) -> Value {
    let site = CallSite::capture();
    Value::native("all", move |args| {
        let xs = args.first().cloned().unwrap_or(Value::None);
        let Some(entries) = entries(&xs) else {
            return Err(PhiError::contract_at(
                site,
                "all",
                2,
                "expected a list/dict or string",
                &xs,
            ));
        };
        for (key, value) in entries {
            if !call(&p, &[value, key], "all", 1, site)?.is_truthy() {
                return Ok(Value::Bool(false));
            }
        }
        Ok(Value::Bool(true))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::apply;

    fn sum3() -> Value {
        // f(acc, value, key) -> acc + value
        Value::native("sum", |args| {
            Ok(Value::Int(
                args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0),
            ))
        })
    }

    fn ints(ns: &[i64]) -> Value {
        Value::list(ns.iter().map(|n| Value::Int(*n)).collect())
    }

    #[test]
    fn fold_threads_the_accumulator() {
        let folder = fold(sum3(), Value::Int(0));
        assert_eq!(apply(&folder, &[ints(&[1, 2, 3])]).unwrap(), Value::Int(6));
    }

    #[test]
    fn fold_over_empty_returns_the_seed() {
        let folder = fold(sum3(), Value::Int(41));
        assert_eq!(apply(&folder, &[ints(&[])]).unwrap(), Value::Int(41));
    }

    #[test]
    fn fold_passes_dict_keys_through() {
        let collect_keys = Value::native("ks", |args| {
            let mut acc = args[0].as_str().unwrap_or_default().to_string();
            acc.push_str(args[2].as_str().unwrap_or_default());
            Ok(Value::string(acc))
        });
        let mut map = Dict::new();
        map.insert("a".to_string(), Value::Int(1));
        map.insert("b".to_string(), Value::Int(2));
        let folder = fold(collect_keys, Value::string(""));
        assert_eq!(
            apply(&folder, &[Value::dict(map)]).unwrap(),
            Value::string("ab")
        );
    }

    #[test]
    fn fold_iterates_strings_by_character() {
        let count = Value::native("count", |args| {
            Ok(Value::Int(args[0].as_int().unwrap_or(0) + 1))
        });
        let folder = fold(count, Value::Int(0));
        assert_eq!(
            apply(&folder, &[Value::string("héllo")]).unwrap(),
            Value::Int(5)
        );
    }

    #[test]
    fn reduce_seeds_from_the_head() {
        let reducer = reduce(sum3());
        assert_eq!(
            apply(&reducer, &[ints(&[1, 2, 3, 4])]).unwrap(),
            Value::Int(10)
        );
    }

    #[test]
    fn reduce_of_a_singleton_is_the_element() {
        let reducer = reduce(sum3());
        assert_eq!(apply(&reducer, &[ints(&[7])]).unwrap(), Value::Int(7));
    }

    #[test]
    fn reduce_of_empty_is_a_domain_error() {
        let reducer = reduce(sum3());
        let err = apply(&reducer, &[ints(&[])]).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn reduce_of_a_dict_is_a_contract_error() {
        let reducer = reduce(sum3());
        let err = apply(&reducer, &[Value::dict(Dict::new())]).unwrap_err();
        assert!(err.is_contract());
    }

    #[test]
    fn map_zips_to_the_shortest_operand() {
        let add = Value::native("add", |args| {
            Ok(Value::Int(
                args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0),
            ))
        });
        let mapper = map(add);
        assert_eq!(
            apply(&mapper, &[ints(&[1, 2, 3]), ints(&[10, 20])]).unwrap(),
            ints(&[11, 22])
        );
    }

    #[test]
    fn map_rejects_non_list_operands() {
        let mapper = map(sum3());
        let err = apply(&mapper, &[ints(&[1]), Value::string("no")]).unwrap_err();
        assert!(err.is_contract());
        assert!(err.to_string().contains("arg 3"));
    }

    #[test]
    fn filter_reindexes_lists_and_keeps_dict_keys() {
        let odd = Value::native("odd", |args| {
            Ok(Value::Bool(args[0].as_int().unwrap_or(0) % 2 != 0))
        });
        let keep_odd = filter(odd.clone());
        assert_eq!(
            apply(&keep_odd, &[ints(&[1, 2, 3, 4, 5])]).unwrap(),
            ints(&[1, 3, 5])
        );

        let mut map = Dict::new();
        map.insert("a".to_string(), Value::Int(1));
        map.insert("b".to_string(), Value::Int(2));
        let kept = apply(&filter(odd), &[Value::dict(map)]).unwrap();
        let mut expect = Dict::new();
        expect.insert("a".to_string(), Value::Int(1));
        assert_eq!(kept, Value::dict(expect));
    }

    #[test]
    fn any_and_all_fold_to_bools() {
        let odd = || {
            Value::native("odd", |args| {
                Ok(Value::Bool(args[0].as_int().unwrap_or(0) % 2 != 0))
            })
        };
        assert_eq!(
            apply(&any(odd()), &[ints(&[2, 4, 5])]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&any(odd()), &[ints(&[2, 4])]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            apply(&all(odd()), &[ints(&[1, 3])]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&all(odd()), &[ints(&[1, 2])]).unwrap(),
            Value::Bool(false)
        );
        // vacuous truth
        assert_eq!(apply(&all(odd()), &[ints(&[])]).unwrap(), Value::Bool(true));
        assert_eq!(apply(&any(odd()), &[ints(&[])]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn each_visits_every_entry() {
        use std::cell::RefCell;
        use std::rc::Rc;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let spy = Value::native("spy", move |args| {
            seen2.borrow_mut().push(args[0].clone());
            Ok(Value::None)
        });
        apply(&each(spy), &[ints(&[5, 6])]).unwrap();
        assert_eq!(*seen.borrow(), vec![Value::Int(5), Value::Int(6)]);
    }
}
