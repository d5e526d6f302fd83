//! Built-in converters for common operations
//!
//! The named converters can be referenced from a [`crate::plan::CopyPlan`].
//! Each one leaves values of shapes it does not understand untouched.
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use super::Converter;
use crate::bean::Value;

/// Names accepted by [`by_name`]
pub const NAMES: &[&str] = &["trim", "uppercase", "lowercase", "to_text", "null_to_empty"];

fn map_str(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::Str(s) => Value::Str(f(&s)),
        other => other,
    }
}

/// Strip leading and trailing whitespace from strings
pub fn trim() -> Converter<'static> {
    Box::new(|v: Value| map_str(v, |s| s.trim().to_string()))
}

/// Upper-case strings
pub fn uppercase() -> Converter<'static> {
    Box::new(|v: Value| map_str(v, str::to_uppercase))
}

/// Lower-case strings
pub fn lowercase() -> Converter<'static> {
    Box::new(|v: Value| map_str(v, str::to_lowercase))
}

/// Render scalars as their text form; lists, beans, and null pass through
pub fn to_text() -> Converter<'static> {
    Box::new(|v: Value| match v {
        Value::Null | Value::List(_) | Value::Bean(_) | Value::Str(_) => v,
        other => other.as_text().map_or(Value::Null, Value::Str),
    })
}

/// Replace null with the empty string
pub fn null_to_empty() -> Converter<'static> {
    Box::new(|v: Value| if v.is_null() { Value::Str(String::new()) } else { v })
}

/// Replace null with a fixed value
pub fn default_value(default: impl Into<Value>) -> Converter<'static> {
    let default = default.into();
    Box::new(move |v: Value| if v.is_null() { default.clone() } else { v })
}

/// Look up a named converter
pub fn by_name(name: &str) -> Option<Converter<'static>> {
    match name {
        "trim" => Some(trim()),
        "uppercase" => Some(uppercase()),
        "lowercase" => Some(lowercase()),
        "to_text" => Some(to_text()),
        "null_to_empty" => Some(null_to_empty()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::EnumType;

    #[test]
    fn test_string_converters() {
        assert_eq!(trim()(Value::from("  a b ")), Value::from("a b"));
        assert_eq!(uppercase()(Value::from("abc")), Value::from("ABC"));
        assert_eq!(lowercase()(Value::from("AbC")), Value::from("abc"));
        assert_eq!(trim()(Value::Int(3)), Value::Int(3));
    }

    #[test]
    fn test_to_text() {
        let status = EnumType::new("Status", ["FIRST"]);
        assert_eq!(to_text()(Value::Int(12)), Value::from("12"));
        assert_eq!(to_text()(Value::Enum(status.value_of("FIRST").unwrap())), Value::from("FIRST"));
        assert_eq!(to_text()(Value::Null), Value::Null);
    }

    #[test]
    fn test_null_replacements() {
        assert_eq!(null_to_empty()(Value::Null), Value::from(""));
        assert_eq!(default_value(9i64)(Value::Null), Value::Int(9));
        assert_eq!(default_value(9i64)(Value::Int(1)), Value::Int(1));
    }

    #[test]
    fn test_by_name_covers_all_names() {
        for name in NAMES {
            assert!(by_name(name).is_some(), "missing converter {}", name);
        }
        assert!(by_name("reverse").is_none());
    }
}
