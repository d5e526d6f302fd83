//! Dynamically typed property values
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use super::descriptor::{EnumValue, META_PROPERTY};
use super::Bean;
use chrono::NaiveDate;
use std::fmt;

/// A value read from or written to a bean property
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null, unset, or absent
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    Enum(EnumValue),
    List(Vec<Value>),
    Bean(Box<dyn Bean>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_bean(&self) -> Option<&dyn Bean> {
        match self {
            Value::Bean(b) => Some(b.as_ref()),
            _ => None,
        }
    }

    /// Textual form of a value: the member name of an enum, the string itself,
    /// or the display form of other scalars. `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Str(s) => Some(s.clone()),
            Value::Enum(e) => Some(e.name().to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Short name of the runtime kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Bean(_) => "bean",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Bean(a), Value::Bean(b)) => bean_eq(a.as_ref(), b.as_ref()),
            _ => false,
        }
    }
}

/// Structural equality of two beans: same type name and equal readable properties
pub fn bean_eq(a: &dyn Bean, b: &dyn Bean) -> bool {
    let descriptor = a.descriptor();
    if descriptor.name() != b.descriptor().name() {
        return false;
    }
    descriptor
        .properties()
        .iter()
        .filter(|p| p.is_readable() && p.name() != META_PROPERTY)
        .all(|p| a.get(p.name()).ok() == b.get(p.name()).ok())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Enum(e) => write!(f, "{}", e),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Bean(b) => write!(f, "{}{{..}}", b.descriptor().name()),
        }
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

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<Box<dyn Bean>> for Value {
    fn from(b: Box<dyn Bean>) -> Self {
        Value::Bean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
