//! A dynamic bean backed by a type descriptor and a value map
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use super::descriptor::{PropertyType, TypeDescriptor, META_PROPERTY};
use super::value::Value;
use super::{Access, Bean};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde_json::{Map, Number, Value as Json};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// General-purpose [`Bean`] whose shape comes from a shared [`TypeDescriptor`]
///
/// Writes honour the declared access mode and type: a read-only property or a
/// value of the wrong kind is refused with [`Access::Denied`].
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: Arc<TypeDescriptor>,
    values: HashMap<String, Value>,
}

impl Record {
    /// Create a record with every property null
    pub fn new(descriptor: Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor,
            values: HashMap::new(),
        }
    }

    /// Initialise a property, bypassing access modes (construction only).
    /// Undeclared names are ignored.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        if name != META_PROPERTY && self.descriptor.property(name).is_some() {
            self.values.insert(name.to_string(), value.into());
        }
        self
    }

    /// Current value of a property, ignoring access modes
    pub fn value(&self, name: &str) -> &Value {
        const NULL: Value = Value::Null;
        self.values.get(name).unwrap_or(&NULL)
    }

    /// Build a record from a JSON object shaped by `descriptor`
    pub fn from_json(descriptor: Arc<TypeDescriptor>, json: &Json) -> Result<Self> {
        record_from_json(descriptor, json, "")
    }

    /// Render every readable declared property (nulls included) as JSON
    pub fn to_json(&self) -> Json {
        let mut map = Map::new();
        for property in self.descriptor.properties() {
            if property.name() == META_PROPERTY || !property.is_readable() {
                continue;
            }
            map.insert(property.name().to_string(), value_to_json(self.value(property.name())));
        }
        Json::Object(map)
    }
}

impl Bean for Record {
    fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    fn get(&self, name: &str) -> Access<Value> {
        if name == META_PROPERTY {
            return Access::Ok(Value::Str(self.descriptor.name().to_string()));
        }
        match self.descriptor.property(name) {
            None => Access::Absent,
            Some(p) if !p.is_readable() => Access::denied(format!("'{}' is write-only", name)),
            Some(_) => Access::Ok(self.value(name).clone()),
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Access<()> {
        let Some(property) = self.descriptor.property(name) else {
            return Access::Absent;
        };
        if !property.is_writable() {
            return Access::denied(format!("'{}' is read-only", name));
        }
        if !property.property_type().accepts(&value) {
            return Access::denied(format!(
                "'{}' expects {}, got {}",
                name,
                property.property_type(),
                value.kind()
            ));
        }
        self.values.insert(name.to_string(), value);
        Access::Ok(())
    }

    fn nested(&self, name: &str) -> Option<&dyn Bean> {
        if !self.descriptor.property(name)?.is_readable() {
            return None;
        }
        self.values.get(name).and_then(Value::as_bean)
    }

    fn nested_mut(&mut self, name: &str) -> Option<&mut dyn Bean> {
        // reaching a child for a write still reads the parent
        if !self.descriptor.property(name)?.is_readable() {
            return None;
        }
        match self.values.get_mut(name) {
            Some(Value::Bean(bean)) => Some(bean.as_mut()),
            _ => None,
        }
    }

    fn clone_bean(&self) -> Box<dyn Bean> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn record_from_json(descriptor: Arc<TypeDescriptor>, json: &Json, path: &str) -> Result<Record> {
    let object = json.as_object().ok_or_else(|| {
        Error::document(
            if path.is_empty() { "$" } else { path },
            format!("expected an object for {}", descriptor.name()),
        )
    })?;

    let mut record = Record::new(Arc::clone(&descriptor));
    for (key, raw) in object {
        if key == META_PROPERTY {
            continue;
        }
        let property_path = join(path, key);
        let property = descriptor.property(key).ok_or_else(|| {
            Error::document(
                &property_path,
                format!("{} declares no property '{}'", descriptor.name(), key),
            )
        })?;
        let value = json_to_value(property.property_type(), raw, &property_path)?;
        record.values.insert(key.clone(), value);
    }
    Ok(record)
}

fn json_to_value(ty: &PropertyType, json: &Json, path: &str) -> Result<Value> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    let mismatch = || Error::document(path, format!("expected {}, found {}", ty, json_kind(json)));

    match ty {
        PropertyType::Bool => json.as_bool().map(Value::Bool).ok_or_else(mismatch),
        PropertyType::Int => json.as_i64().map(Value::Int).ok_or_else(mismatch),
        PropertyType::Float => json.as_f64().map(Value::Float).ok_or_else(mismatch),
        PropertyType::String => json.as_str().map(Value::from).ok_or_else(mismatch),
        PropertyType::Date => {
            let text = json.as_str().ok_or_else(mismatch)?;
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|e| Error::document(path, format!("invalid date '{}': {}", text, e)))
        }
        PropertyType::Enum(enum_type) => {
            let literal = json.as_str().ok_or_else(mismatch)?;
            enum_type
                .value_of(literal)
                .map(Value::Enum)
                .ok_or_else(|| Error::InvalidEnumLiteral {
                    enum_name: enum_type.name().to_string(),
                    literal: literal.to_string(),
                    path: path.to_string(),
                    expected: enum_type.members().to_vec(),
                })
        }
        PropertyType::Bean(bean_type) => {
            let nested = record_from_json(Arc::clone(bean_type), json, path)?;
            Ok(Value::Bean(Box::new(nested)))
        }
        PropertyType::List(inner) => {
            let items = json.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| json_to_value(inner, item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::List)
        }
        PropertyType::Any => untyped_json_to_value(json, path),
    }
}

fn untyped_json_to_value(json: &Json, path: &str) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => Ok(n
            .as_i64()
            .map(Value::Int)
            .unwrap_or_else(|| Value::Float(n.as_f64().unwrap_or_default()))),
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| untyped_json_to_value(item, &format!("{}[{}]", path, i)))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        Json::Object(_) => Err(Error::document(
            path,
            "objects need a declared bean type, not 'any'",
        )),
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::Number(Number::from(*i)),
        Value::Float(x) => Number::from_f64(*x).map_or(Json::Null, Json::Number),
        Value::Str(s) => Json::String(s.clone()),
        Value::Date(d) => Json::String(d.format(DATE_FORMAT).to_string()),
        Value::Enum(e) => Json::String(e.name().to_string()),
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Bean(bean) => match bean.downcast_ref::<Record>() {
            Some(record) => record.to_json(),
            None => bean_to_json(bean.as_ref()),
        },
    }
}

fn bean_to_json(bean: &dyn Bean) -> Json {
    let mut map = Map::new();
    for property in bean.descriptor().properties() {
        if property.name() == META_PROPERTY {
            continue;
        }
        if let Access::Ok(value) = bean.get(property.name()) {
            map.insert(property.name().to_string(), value_to_json(&value));
        }
    }
    Json::Object(map)
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::EnumType;
    use serde_json::json;

    fn nested_type() -> Arc<TypeDescriptor> {
        TypeDescriptor::builder("NestedProp")
            .property("prop1", PropertyType::String)
            .build()
    }

    fn domain_type() -> Arc<TypeDescriptor> {
        TypeDescriptor::builder("Domain")
            .property("name", PropertyType::String)
            .property("status", PropertyType::Enum(EnumType::new("Status", ["FIRST", "SECOND"])))
            .property("born", PropertyType::Date)
            .property("nested", PropertyType::Bean(nested_type()))
            .property("tags", PropertyType::List(Box::new(PropertyType::String)))
            .read_only("id", PropertyType::Int)
            .write_only("secret", PropertyType::String)
            .build()
    }

    #[test]
    fn test_get_set() {
        let mut record = Record::new(domain_type());
        assert_eq!(record.get("name"), Access::Ok(Value::Null));
        assert_eq!(record.set("name", Value::from("a")), Access::Ok(()));
        assert_eq!(record.get("name"), Access::Ok(Value::from("a")));
        assert_eq!(record.get("unknown"), Access::Absent);
        assert_eq!(record.set("unknown", Value::from("a")), Access::Absent);
    }

    #[test]
    fn test_meta_property() {
        let mut record = Record::new(domain_type());
        assert_eq!(record.get(META_PROPERTY), Access::Ok(Value::from("Domain")));
        assert!(record.set(META_PROPERTY, Value::from("Other")).is_denied());
    }

    #[test]
    fn test_access_modes_are_enforced() {
        let mut record = Record::new(domain_type()).with("id", 7i64);
        assert!(record.set("id", Value::Int(8)).is_denied());
        assert_eq!(record.value("id"), &Value::Int(7));

        assert_eq!(record.set("secret", Value::from("s")), Access::Ok(()));
        assert!(record.get("secret").is_denied());
    }

    #[test]
    fn test_type_mismatch_is_denied() {
        let mut record = Record::new(domain_type());
        assert!(record.set("name", Value::Int(1)).is_denied());
        assert!(record.set("status", Value::from("FIRST")).is_denied());
        assert_eq!(record.value("name"), &Value::Null);
    }

    #[test]
    fn test_nested_navigation() {
        let nested = Record::new(nested_type()).with("prop1", "inner");
        let mut record = Record::new(domain_type()).with("nested", Value::Bean(Box::new(nested)));

        assert_eq!(record.nested("nested").unwrap().get("prop1"), Access::Ok(Value::from("inner")));
        record
            .nested_mut("nested")
            .unwrap()
            .set("prop1", Value::from("changed"));
        assert_eq!(record.nested("nested").unwrap().get("prop1"), Access::Ok(Value::from("changed")));
        assert!(record.nested("name").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let input = json!({
            "name": "alpha",
            "status": "SECOND",
            "born": "1990-05-17",
            "nested": { "prop1": "inner" },
            "tags": ["a", "b"],
            "id": 3
        });
        let record = Record::from_json(domain_type(), &input).unwrap();
        assert_eq!(record.value("status").as_enum().map(|e| e.name()), Some("SECOND"));

        let output = record.to_json();
        assert_eq!(output["name"], json!("alpha"));
        assert_eq!(output["status"], json!("SECOND"));
        assert_eq!(output["born"], json!("1990-05-17"));
        assert_eq!(output["nested"], json!({ "prop1": "inner" }));
        assert_eq!(output["tags"], json!(["a", "b"]));
        assert_eq!(output["id"], json!(3));
        assert!(output.get("secret").is_none());
        assert!(output.get(META_PROPERTY).is_none());
    }

    #[test]
    fn test_from_json_errors() {
        let err = Record::from_json(domain_type(), &json!({ "nope": 1 })).unwrap_err();
        assert!(matches!(err, Error::Document { ref path, .. } if path == "nope"));

        let err = Record::from_json(domain_type(), &json!({ "nested": { "prop1": 5 } })).unwrap_err();
        assert!(matches!(err, Error::Document { ref path, .. } if path == "nested.prop1"));

        let err = Record::from_json(domain_type(), &json!({ "status": "third" })).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumLiteral { .. }));

        let err = Record::from_json(domain_type(), &json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::Document { ref path, .. } if path == "$"));
    }
}
