//! Property access capability for runtime-shaped objects
//!
//! A [`Bean`] exposes named properties whose shape is described at runtime by a
//! [`TypeDescriptor`]. The copy engine only ever talks to objects through this
//! trait; how an implementation stores its fields is its own business.
//!
//! # Module Organization
//!
//! - [`descriptor`] - Declared types, properties, and enumerations
//! - [`value`] - The dynamically typed [`Value`]
//! - [`record`] - [`Record`], a general-purpose dynamic bean
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

pub mod descriptor;
pub mod record;
pub mod value;

pub use descriptor::{
    EnumType, EnumValue, PropertyDescriptor, PropertyType, TypeDescriptor, TypeDescriptorBuilder,
    META_PROPERTY,
};
pub use record::Record;
pub use value::Value;

use std::any::Any;
use std::fmt;

/// Outcome of a single property read or write
#[derive(Debug, Clone, PartialEq)]
pub enum Access<T> {
    /// The access succeeded
    Ok(T),
    /// Nothing to access: the property is not declared, or a parent is null
    Absent,
    /// The property exists but the accessor refused the operation
    Denied(String),
}

impl<T> Access<T> {
    /// Collapse to an option; `Absent` and `Denied` both become `None`
    pub fn ok(self) -> Option<T> {
        match self {
            Access::Ok(value) => Some(value),
            Access::Absent | Access::Denied(_) => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Access::Ok(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Access::Denied(_))
    }

    pub(crate) fn denied(reason: impl Into<String>) -> Self {
        Access::Denied(reason.into())
    }
}

/// An object with runtime-discoverable properties
///
/// `get` and `set` operate on a single property name; dotted paths are handled
/// by [`crate::copier::path`] on top of [`Bean::nested`] and
/// [`Bean::nested_mut`].
///
/// The provided `has_property` and `declared_type` answer from the descriptor
/// alone, so they report the declared shape even when the current value is null.
pub trait Bean: Any + fmt::Debug {
    /// Declared shape of this object
    fn descriptor(&self) -> &TypeDescriptor;

    /// Read a property
    fn get(&self, name: &str) -> Access<Value>;

    /// Write a property
    fn set(&mut self, name: &str, value: Value) -> Access<()>;

    /// Borrow the bean held by a property, if it is bean-typed and non-null
    fn nested(&self, _name: &str) -> Option<&dyn Bean> {
        None
    }

    /// Mutably borrow the bean held by a property
    fn nested_mut(&mut self, _name: &str) -> Option<&mut dyn Bean> {
        None
    }

    fn clone_bean(&self) -> Box<dyn Bean>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn has_property(&self, name: &str) -> bool {
        self.descriptor().property(name).is_some()
    }

    fn declared_type(&self, name: &str) -> Option<&PropertyType> {
        self.descriptor()
            .property(name)
            .map(PropertyDescriptor::property_type)
    }
}

impl Clone for Box<dyn Bean> {
    fn clone(&self) -> Self {
        self.clone_bean()
    }
}

impl dyn Bean {
    /// Downcast a borrowed bean to its concrete type
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Take a concrete bean out of a [`Value::Bean`]
///
/// Returns the value back unchanged when it holds something else.
pub fn take_bean<T: Bean>(value: Value) -> Result<T, Value> {
    match value {
        Value::Bean(bean) => {
            if bean.as_any().is::<T>() {
                bean.into_any()
                    .downcast::<T>()
                    .map(|b| *b)
                    .map_err(|_| Value::Null)
            } else {
                Err(Value::Bean(bean))
            }
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_access_ok() {
        assert_eq!(Access::Ok(3).ok(), Some(3));
        assert_eq!(Access::<i32>::Absent.ok(), None);
        assert_eq!(Access::<i32>::denied("read-only").ok(), None);
        assert!(Access::<()>::denied("x").is_denied());
        assert!(Access::Ok(()).is_ok());
    }

    #[test]
    fn test_take_bean() {
        let ty: Arc<TypeDescriptor> = TypeDescriptor::builder("Nested")
            .property("prop1", PropertyType::String)
            .build();
        let record = Record::new(ty).with("prop1", "x");

        let value = Value::Bean(Box::new(record.clone()));
        let back: Record = take_bean(value).unwrap();
        assert_eq!(back.value("prop1"), &Value::from("x"));

        assert_eq!(take_bean::<Record>(Value::Int(1)).unwrap_err(), Value::Int(1));
    }

    #[test]
    fn test_downcast_ref() {
        let ty = TypeDescriptor::builder("Empty").build();
        let bean: Box<dyn Bean> = Box::new(Record::new(ty));
        assert!(bean.downcast_ref::<Record>().is_some());
    }
}
