//! Scalar comparisons: strict equality plus ordered comparison over two
//! numbers (with int-to-float promotion) or two strings.

use std::cmp::Ordering;

use phi_core::{PhiError, Value};

/// Strict value equality. Never coerces across Int/Float.
pub fn eq(a: &Value, b: &Value) -> Value {
    Value::Bool(a == b)
}

#[track_caller]
fn ord(a: &Value, b: &Value, callee: &'static str) -> Result<Ordering, PhiError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let x = a.as_float().unwrap_or(0.0);
            let y = b.as_float().unwrap_or(0.0);
            Ok(x.total_cmp(&y))
        }
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Err(PhiError::contract(
            callee,
            2,
            "expected two numbers or two strings",
            b,
        )),
    }
}

#[track_caller]
pub fn gt(a: &Value, b: &Value) -> Result<Value, PhiError> {
    Ok(Value::Bool(ord(a, b, "gt")? == Ordering::Greater))
}

#[track_caller]
pub fn gte(a: &Value, b: &Value) -> Result<Value, PhiError> {
    Ok(Value::Bool(ord(a, b, "gte")? != Ordering::Less))
}

#[track_caller]
pub fn lt(a: &Value, b: &Value) -> Result<Value, PhiError> {
    Ok(Value::Bool(ord(a, b, "lt")? == Ordering::Less))
}

#[track_caller]
pub fn lte(a: &Value, b: &Value) -> Result<Value, PhiError> {
    Ok(Value::Bool(ord(a, b, "lte")? != Ordering::Greater))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_is_strict() {
        assert_eq!(eq(&Value::Int(1), &Value::Int(1)), Value::Bool(true));
        assert_eq!(eq(&Value::Int(1), &Value::Float(1.0)), Value::Bool(false));
        assert_eq!(
            eq(&Value::string("a"), &Value::string("a")),
            Value::Bool(true)
        );
    }

    #[test]
    fn numbers_compare_with_promotion() {
        assert_eq!(
            gt(&Value::Float(1.5), &Value::Int(1)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            lte(&Value::Int(2), &Value::Float(2.0)).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert_eq!(
            lt(&Value::string("abc"), &Value::string("abd")).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn mixed_shapes_are_a_contract_violation() {
        assert!(gt(&Value::Int(1), &Value::string("1")).unwrap_err().is_contract());
        assert!(lt(&Value::list(vec![]), &Value::Int(1)).unwrap_err().is_contract());
    }
}
