//! phi-stdlib: curried, shape-polymorphic combinators over phi values.
//!
//! Every configured operation (`fold(f, seed)`, `filter(p)`, `get(path)`,
//! ...) returns a [`Value::Fn`], so pipeline stages are ordinary values
//! that [`comp`]/[`compose`] chain and [`apply`] drives. Direct operations
//! (`head`, `concat`, `uniq`, ...) take the collection and answer
//! `Result<Value, PhiError>`.

pub mod comparison;
pub mod func;
pub mod iter;
pub mod path;
pub mod predicates;
pub mod records;
pub mod seq;
pub mod sets;

pub use phi_core::{json, CallSite, Dict, NativeFn, PhiError, Value};

pub use comparison::{eq, gt, gte, lt, lte};
pub use func::{
    apply, apply_to, cnst, comp, compose, either, flip, id, maybe, not, pair, partial, spread,
    tee,
};
pub use iter::{all, any, each, filter, fold, map, reduce};
pub use path::{get, get_or, set};
pub use records::{pick, pluck};
pub use seq::{
    chunk, find_key, flat, head, init, keys, last, len, reverse, slice, snd, sort_by, tail, vals,
};
pub use sets::{concat, diff, has, intersect, uniq};
