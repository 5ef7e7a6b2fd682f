use std::any::Any;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::PhiError;

/// Insertion-ordered string-keyed mapping, the payload of [`Value::Dict`].
pub type Dict = IndexMap<String, Value>;

/// A native function callable through the uniform `&[Value]` convention.
pub type NativeFnInner = dyn Fn(&[Value]) -> Result<Value, PhiError>;

pub struct NativeFn {
    pub name: String,
    pub func: Box<NativeFnInner>,
}

impl NativeFn {
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, PhiError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(f),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

/// The core Value type: every runtime shape the algebra operates on.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Rc<String>),
    List(Rc<Vec<Value>>),
    Dict(Rc<Dict>),
    Fn(Rc<NativeFn>),
    Err(Rc<PhiError>),
    Object(Rc<dyn Any>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Fn(_) => "fn",
            Value::Err(_) => "error",
            Value::Object(_) => "object",
        }
    }

    pub fn string(s: impl Into<String>) -> Value {
        Value::String(Rc::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(items))
    }

    pub fn dict(map: Dict) -> Value {
        Value::Dict(Rc::new(map))
    }

    pub fn native(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, PhiError> + 'static,
    ) -> Value {
        Value::Fn(Rc::new(NativeFn::new(name, f)))
    }

    pub fn error(err: PhiError) -> Value {
        Value::Err(Rc::new(err))
    }

    pub fn object(obj: impl Any) -> Value {
        Value::Object(Rc::new(obj))
    }

    /// Classify untagged keyed data into a List or a Dict.
    ///
    /// A List iff the keys, read in order, are exactly the decimal forms of
    /// `0..count-1`. Everything else — sparse numeric keys, non-numeric
    /// keys, the empty entry set — is a Dict. This is the one place the
    /// sequence/mapping decision is made; operations trust the tag.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Value {
        let entries: Vec<(String, Value)> = entries.into_iter().collect();
        let contiguous = !entries.is_empty()
            && entries
                .iter()
                .enumerate()
                .all(|(i, (k, _))| k == &i.to_string());
        if contiguous {
            Value::list(entries.into_iter().map(|(_, v)| v).collect())
        } else {
            Value::dict(entries.into_iter().collect())
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Fn(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Value::Err(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_iterable(&self) -> bool {
        matches!(self, Value::String(_) | Value::List(_) | Value::Dict(_))
    }

    /// Only `None` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::None | Value::Bool(false))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_err(&self) -> Option<&PhiError> {
        match self {
            Value::Err(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_object<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Read this value as a positional key: a non-negative Int, or a String
    /// holding a canonical decimal (no sign, no leading zeros).
    pub fn as_key_index(&self) -> Option<usize> {
        match self {
            Value::Int(n) if *n >= 0 => Some(*n as usize),
            Value::String(s) => {
                let canonical = s.as_str() == "0"
                    || (!s.is_empty()
                        && !s.starts_with('0')
                        && s.chars().all(|c| c.is_ascii_digit()));
                if canonical {
                    s.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Read this value as a Dict key: Strings verbatim, Ints by their
    /// decimal form.
    pub fn as_key_name(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.to_string()),
            Value::Int(n) if *n >= 0 => Some(n.to_string()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Fn(a), Value::Fn(b)) => Rc::ptr_eq(a, b),
            (Value::Err(a), Value::Err(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Dict(map) => f.debug_tuple("Dict").field(map).finish(),
            Value::Fn(nf) => write!(f, "Fn({})", nf.name),
            Value::Err(e) => f.debug_tuple("Err").field(e).finish(),
            Value::Object(_) => write!(f, "Object(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => {
                if x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Dict(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Fn(nf) => write!(f, "<fn {}>", nf.name),
            Value::Err(e) => write!(f, "<error {e}>"),
            Value::Object(_) => write!(f, "<object>"),
        }
    }
}
