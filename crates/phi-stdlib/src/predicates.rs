//! The type classifiers as function values, so they compose point-free
//! with `any`/`all`/`filter`. The classifiers themselves are methods on
//! `Value`; these constructors wrap them in the calling convention. A
//! missing argument classifies as `None`.

use phi_core::Value;

fn predicate(name: &'static str, test: fn(&Value) -> bool) -> Value {
    Value::native(name, move |args| {
        Ok(Value::Bool(test(args.first().unwrap_or(&Value::None))))
    })
}

pub fn is_string() -> Value {
    predicate("is_string", Value::is_string)
}

pub fn is_number() -> Value {
    predicate("is_number", Value::is_number)
}

pub fn is_bool() -> Value {
    predicate("is_bool", Value::is_bool)
}

pub fn is_int() -> Value {
    predicate("is_int", Value::is_int)
}

pub fn is_float() -> Value {
    predicate("is_float", Value::is_float)
}

pub fn is_function() -> Value {
    predicate("is_function", Value::is_function)
}

pub fn is_none() -> Value {
    predicate("is_none", Value::is_none)
}

pub fn is_list() -> Value {
    predicate("is_list", Value::is_list)
}

pub fn is_dict() -> Value {
    predicate("is_dict", Value::is_dict)
}

pub fn is_object() -> Value {
    predicate("is_object", Value::is_object)
}

pub fn is_err() -> Value {
    predicate("is_err", Value::is_err)
}

pub fn is_iterable() -> Value {
    predicate("is_iterable", Value::is_iterable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::apply;

    #[test]
    fn predicates_answer_bools() {
        assert_eq!(
            apply(&is_string(), &[Value::string("x")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&is_string(), &[Value::Int(1)]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            apply(&is_number(), &[Value::Float(1.5)]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn missing_argument_classifies_as_none() {
        assert_eq!(apply(&is_none(), &[]).unwrap(), Value::Bool(true));
        assert_eq!(apply(&is_list(), &[]).unwrap(), Value::Bool(false));
    }
}
