//! Dynamic argument values.
//!
//! A test vector is an ordered tuple of heterogeneous values, so the engine
//! carries arguments as [`Value`] and tuples as [`Vector`]. The display form
//! is what metadata export and CSV export write out.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One argument tuple, positionally aligned with a `ParamSet`'s arguments.
pub type Vector = Vec<Value>;

/// A member of a closed, named enumeration (see `EnumType`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    pub enum_name: String,
    pub member: String,
}

impl EnumMember {
    pub fn new(enum_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            enum_name: enum_name.into(),
            member: member.into(),
        }
    }
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name, self.member)
    }
}

/// Semantic type tag of a value or of what a generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Unknown or mixed.
    Any,
    Null,
    Bool,
    Int,
    Float,
    Str,
    Enum,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Any => "any",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Enum => "enum",
            ValueKind::List => "list",
        };
        f.write_str(name)
    }
}

/// A single argument value.
///
/// Integers and floats compare numerically with each other. Values of
/// unrelated kinds are unordered, so `<` between them is false. Enum members
/// are equal or unordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Enum(EnumMember),
    List(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Enum(_) => ValueKind::Enum,
            Value::List(_) => ValueKind::List,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float view; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumMember> {
        match self {
            Value::Enum(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            (Value::Enum(a), Value::Enum(b)) => (a == b).then_some(Ordering::Equal),
            (Value::List(a), Value::List(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing ".0" on whole floats.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => f.write_str(s),
            Value::Enum(m) => write!(f, "{m}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<EnumMember> for Value {
    fn from(m: EnumMember) -> Self {
        Value::Enum(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Build a [`Vector`] from heterogeneous literals.
///
/// ```
/// use paramvec_core::{vector, Value};
/// let v = vector![1, "fast", 2.5];
/// assert_eq!(v[1], Value::Str("fast".into()));
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($v)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(10.0).to_string(), "10.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::from("fast").to_string(), "fast");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(
            Value::from(EnumMember::new("Status", "ACTIVE")).to_string(),
            "Status.ACTIVE"
        );
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn same_variant_ordering() {
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::Float(0.5) < Value::Float(1.5));
        assert!(Value::from("a") < Value::from("b"));
    }

    #[test]
    fn ints_and_floats_compare_numerically() {
        assert!(Value::Float(0.5) < Value::Int(5));
        assert!(!(Value::Int(5) < Value::Float(0.5)));
        assert!(Value::Int(2) > Value::Float(1.5));
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_eq!(
            Value::Int(3).partial_cmp(&Value::Float(3.5)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn unrelated_kinds_are_unordered() {
        assert_eq!(Value::Int(1).partial_cmp(&Value::from("1")), None);
        assert!(!(Value::Int(1) < Value::from("a")));
        assert!(!(Value::from("a") < Value::Int(1)));
        assert_ne!(Value::Bool(true), Value::Int(1));
        assert_ne!(Value::Null, Value::Int(0));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn enum_members_are_equal_or_unordered() {
        let low = Value::from(EnumMember::new("Priority", "LOW"));
        let high = Value::from(EnumMember::new("Priority", "HIGH"));
        assert_eq!(low, low.clone());
        assert_eq!(low.partial_cmp(&high), None);
    }

    #[test]
    fn lists_compare_elementwise() {
        let a = Value::List(vector![1, 2.5]);
        let b = Value::List(vector![1.0, 3]);
        assert!(a < b);
        assert_eq!(Value::List(vector![1, 2]), Value::List(vector![1.0, 2.0]));
    }

    #[test]
    fn vector_macro_converts_each_element() {
        let v = vector![1, "x", 2.5, true];
        assert_eq!(
            v,
            vec![
                Value::Int(1),
                Value::Str("x".into()),
                Value::Float(2.5),
                Value::Bool(true)
            ]
        );
        assert!(vector![].is_empty());
    }

    #[test]
    fn option_none_is_null() {
        let none: Option<i64> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }

    #[test]
    fn float_view_widens_ints() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::from("3").as_float(), None);
    }

    #[test]
    fn serde_round_trip() {
        let v = vector![1, "x", EnumMember::new("Color", "RED")];
        let json = serde_json::to_string(&v).unwrap();
        let back: Vector = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
