//! The function algebra: application, composition, and argument plumbing.
//!
//! Configured combinators return `Value::Fn`, so every stage of a pipeline
//! is itself a value that `comp`/`compose` can chain.

use std::slice;

use phi_core::{CallSite, PhiError, Value};

/// Apply `f` to `args` at an explicit call site. This is the single
/// application path every combinator drives user functions through.
pub(crate) fn call(
    f: &Value,
    args: &[Value],
    callee: &'static str,
    position: usize,
    site: CallSite,
) -> Result<Value, PhiError> {
    match f {
        Value::Fn(nf) => (nf.func)(args),
        other => Err(PhiError::contract_at(
            site,
            callee,
            position,
            "expected a function",
            other,
        )),
    }
}

/// Direct application: `apply(f, args)` is `f(args...)`.
#[track_caller]
pub fn apply(f: &Value, args: &[Value]) -> Result<Value, PhiError> {
    call(f, args, "apply", 1, CallSite::capture())
}

/// Flipped application: `apply_to(args)` is `f -> f(args...)`.
#[track_caller]
pub fn apply_to(args: Vec<Value>) -> Value {
    let site = CallSite::capture();
    Value::native("apply_to", move |fargs| {
        let f = fargs.first().cloned().unwrap_or(Value::None);
        call(&f, &args, "apply_to", 1, site)
    })
}

/// The identity function as a value.
pub fn id() -> Value {
    Value::native("id", |args| {
        Ok(args.first().cloned().unwrap_or(Value::None))
    })
}

/// `cnst(x)` is a function that ignores its argument and returns `x`.
pub fn cnst(x: Value) -> Value {
    Value::native("cnst", move |_| Ok(x.clone()))
}

/// Swap the first two curried positions: `flip(f)(a)(b)` is `f(b)(a)`.
#[track_caller]
pub fn flip(f: Value) -> Value {
    let site = CallSite::capture();
    Value::native("flip", move |args| {
        let a = args.first().cloned().unwrap_or(Value::None);
        let f = f.clone();
        Ok(Value::native("flip", move |args| {
            let b = args.first().cloned().unwrap_or(Value::None);
            let g = call(&f, slice::from_ref(&b), "flip", 1, site)?;
            call(&g, slice::from_ref(&a), "flip", 1, site)
        }))
    })
}

/// Adapt a positional function to take its arguments packed as one list.
#[track_caller]
pub fn spread(f: Value) -> Value {
    let site = CallSite::capture();
    Value::native("spread", move |args| {
        let packed = args.first().cloned().unwrap_or(Value::None);
        match &packed {
            Value::List(items) => call(&f, items, "spread", 1, site),
            other => Err(PhiError::contract_at(
                site,
                "spread",
                2,
                "expected a list of arguments",
                other,
            )),
        }
    })
}

/// `compose(f, g)` is `...x -> f(g(...x))`.
#[track_caller]
pub fn compose(f: Value, g: Value) -> Value {
    let site = CallSite::capture();
    Value::native("compose", move |args| {
        let inner = call(&g, args, "compose", 2, site)?;
        call(&f, slice::from_ref(&inner), "compose", 1, site)
    })
}

/// n-ary pipeline applied right-to-left: `comp([f, g, h])(x)` is
/// `f(g(h(x)))`. The left fold of `compose` seeded with `id`, so an empty
/// list composes to the identity.
#[track_caller]
pub fn comp(fs: Vec<Value>) -> Value {
    let mut acc = id();
    for f in fs {
        acc = compose(acc, f);
    }
    acc
}

/// Bind leading arguments: `partial(f, [a, b])(c)` is `f(a, b, c)`.
#[track_caller]
pub fn partial(f: Value, bound: Vec<Value>) -> Value {
    let site = CallSite::capture();
    Value::native("partial", move |args| {
        let mut all = bound.clone();
        all.extend(args.iter().cloned());
        call(&f, &all, "partial", 1, site)
    })
}

/// Splice a side effect into a pipeline: `tee(f)(x)` runs `f(x)` and
/// returns `x` unchanged.
#[track_caller]
pub fn tee(f: Value) -> Value {
    let site = CallSite::capture();
    Value::native("tee", move |args| {
        let x = args.first().cloned().unwrap_or(Value::None);
        call(&f, slice::from_ref(&x), "tee", 1, site)?;
        Ok(x)
    })
}

/// A two-element list.
pub fn pair(a: Value, b: Value) -> Value {
    Value::list(vec![a, b])
}

/// Negate a predicate by truthiness.
#[track_caller]
pub fn not(p: Value) -> Value {
    let site = CallSite::capture();
    Value::native("not", move |args| {
        let res = call(&p, args, "not", 1, site)?;
        Ok(Value::Bool(!res.is_truthy()))
    })
}

/// `maybe(x)(z)` is `None` when `x` is `None`, otherwise `z`.
pub fn maybe(x: Value) -> Value {
    Value::native("maybe", move |args| {
        if x.is_none() {
            Ok(Value::None)
        } else {
            Ok(args.first().cloned().unwrap_or(Value::None))
        }
    })
}

/// Dispatch over a `[left, right]` pair: a non-`None` left goes to
/// `on_left`, otherwise `on_right` receives the right slot.
#[track_caller]
pub fn either(on_left: Value, on_right: Value) -> Value {
    let site = CallSite::capture();
    Value::native("either", move |args| {
        let pair = args.first().cloned().unwrap_or(Value::None);
        match &pair {
            Value::List(items) if items.len() == 2 => {
                if items[0].is_none() {
                    call(&on_right, slice::from_ref(&items[1]), "either", 2, site)
                } else {
                    call(&on_left, slice::from_ref(&items[0]), "either", 1, site)
                }
            }
            other => Err(PhiError::contract_at(
                site,
                "either",
                3,
                "expected a [left, right] pair",
                other,
            )),
        }
    })
}
