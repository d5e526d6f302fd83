//! Value converters applied between reading a source property and writing it
//!
//! A source may register any number of converters; they run in registration
//! order and the last one's output is what gets written. Enum coercion does not
//! go through converters.
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

pub mod built_in;

use crate::bean::Value;

/// A unary value transformation
pub type Converter<'s> = Box<dyn Fn(Value) -> Value + 's>;

/// Run `value` through `converters` in order
pub fn apply_all(converters: &[Converter<'_>], value: Value) -> Value {
    converters
        .iter()
        .fold(value, |current, converter| converter(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_all_runs_in_order() {
        let converters: Vec<Converter<'_>> = vec![
            Box::new(|v: Value| Value::from(format!("{}-a", v))),
            Box::new(|v: Value| Value::from(format!("{}-b", v))),
        ];
        assert_eq!(apply_all(&converters, Value::from("x")), Value::from("x-a-b"));
    }

    #[test]
    fn test_apply_all_without_converters() {
        assert_eq!(apply_all(&[], Value::Int(5)), Value::Int(5));
    }
}
