//! Declared types loaded from a schema document
//!
//! A [`SchemaDocument`] lists enumerations and bean types by name. A
//! [`TypeRegistry`] resolves it into shared [`TypeDescriptor`]s so that
//! [`Record`]s can be built from JSON documents and copied with the engine.
//!
//! ```
//! use propbridge_core::schema::TypeRegistry;
//! use serde_json::json;
//!
//! let registry = TypeRegistry::from_json_str(r#"{
//!     "enums": { "Status": ["FIRST", "SECOND"] },
//!     "types": {
//!         "Dto": [
//!             { "name": "label", "type": "string" },
//!             { "name": "status", "type": "Status" }
//!         ]
//!     }
//! }"#).unwrap();
//!
//! let dto = registry.record("Dto", &json!({ "label": "a", "status": "FIRST" })).unwrap();
//! assert_eq!(dto.to_json()["status"], json!("FIRST"));
//! ```
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use crate::bean::{EnumType, PropertyDescriptor, PropertyType, Record, TypeDescriptor, META_PROPERTY};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Suffix marking a list type expression, e.g. `string[]`
const LIST_SUFFIX: &str = "[]";

/// Primitive type expressions
const PRIMITIVES: &[&str] = &["string", "int", "float", "bool", "date", "any"];

/// Serialized form of a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaDocument {
    /// Enumeration name to ordered member names
    pub enums: BTreeMap<String, Vec<String>>,

    /// Type name to ordered property declarations
    pub types: BTreeMap<String, Vec<PropertySpec>>,
}

/// One declared property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySpec {
    pub name: String,

    /// Type expression: a primitive, an enum or type name, or `T[]`
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub access: AccessMode,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            access: AccessMode::default(),
        }
    }

    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }
}

/// Declared access mode of a property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMode {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

/// Resolved enumerations and bean types, shared by name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    enums: HashMap<String, Arc<EnumType>>,
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// Resolve every enumeration and type of `document`
    pub fn from_document(document: &SchemaDocument) -> Result<Self> {
        let mut registry = TypeRegistry::default();

        for (name, members) in &document.enums {
            check_name(name)?;
            let mut seen = HashSet::new();
            for member in members {
                if !seen.insert(member.as_str()) {
                    return Err(Error::schema(
                        format!("enum '{}' lists member '{}' twice", name, member),
                        Some(name.as_str()),
                    ));
                }
            }
            if members.is_empty() {
                return Err(Error::schema(format!("enum '{}' has no members", name), Some(name.as_str())));
            }
            registry
                .enums
                .insert(name.clone(), EnumType::new(name.clone(), members.iter().cloned()));
        }

        for name in document.types.keys() {
            check_name(name)?;
            if registry.enums.contains_key(name) {
                return Err(Error::schema(
                    format!("'{}' is declared both as an enum and as a type", name),
                    Some(name.as_str()),
                ));
            }
        }

        let mut resolver = Resolver {
            document,
            registry: &mut registry,
            visiting: Vec::new(),
        };
        for name in document.types.keys() {
            resolver.resolve(name)?;
        }

        debug!(
            enums = registry.enums.len(),
            types = registry.types.len(),
            "schema resolved"
        );
        Ok(registry)
    }

    /// Parse a JSON schema document and resolve it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        Self::from_document(&document)
    }

    pub fn descriptor(&self, name: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(name)
    }

    pub fn enum_type(&self, name: &str) -> Option<&Arc<EnumType>> {
        self.enums.get(name)
    }

    /// Type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Enumeration names, sorted
    pub fn enum_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enums.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn require(&self, type_name: &str) -> Result<&Arc<TypeDescriptor>> {
        self.descriptor(type_name)
            .ok_or_else(|| Error::schema(format!("unknown type '{}'", type_name), Some(type_name)))
    }

    /// A record of `type_name` with every property null
    pub fn empty_record(&self, type_name: &str) -> Result<Record> {
        Ok(Record::new(Arc::clone(self.require(type_name)?)))
    }

    /// Build a record of `type_name` from a JSON object
    pub fn record(&self, type_name: &str, json: &Json) -> Result<Record> {
        Record::from_json(Arc::clone(self.require(type_name)?), json)
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.ends_with(LIST_SUFFIX) || name.contains('.') {
        return Err(Error::schema(format!("invalid type name '{}'", name), Some(name)));
    }
    if PRIMITIVES.contains(&name) {
        return Err(Error::schema(
            format!("'{}' is a built-in type and cannot be redeclared", name),
            Some(name),
        ));
    }
    Ok(())
}

/// Depth-first resolution of bean types; nested types are built before the
/// types that hold them
struct Resolver<'d, 'r> {
    document: &'d SchemaDocument,
    registry: &'r mut TypeRegistry,
    visiting: Vec<String>,
}

impl Resolver<'_, '_> {
    fn resolve(&mut self, name: &str) -> Result<Arc<TypeDescriptor>> {
        if let Some(done) = self.registry.types.get(name) {
            return Ok(Arc::clone(done));
        }
        if let Some(start) = self.visiting.iter().position(|v| v == name) {
            let mut cycle = self.visiting[start..].to_vec();
            cycle.push(name.to_string());
            return Err(Error::schema(
                format!("circular type reference: {}", cycle.join(" -> ")),
                Some(name),
            ));
        }
        let document = self.document;
        let Some(specs) = document.types.get(name) else {
            return Err(Error::schema(format!("unknown type '{}'", name), Some(name)));
        };

        self.visiting.push(name.to_string());
        let mut seen = HashSet::new();
        let mut builder = TypeDescriptor::builder(name);
        for spec in specs {
            if spec.name.is_empty() || spec.name.contains('.') {
                return Err(Error::schema(
                    format!("type '{}' declares an invalid property name '{}'", name, spec.name),
                    Some(name),
                ));
            }
            if spec.name == META_PROPERTY {
                return Err(Error::schema(
                    format!("'{}' is reserved and cannot be declared on '{}'", META_PROPERTY, name),
                    Some(name),
                ));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(Error::schema(
                    format!("type '{}' declares property '{}' twice", name, spec.name),
                    Some(name),
                ));
            }
            let ty = self.parse(&spec.ty, name)?;
            let property = PropertyDescriptor::new(spec.name.clone(), ty);
            builder = builder.descriptor(match spec.access {
                AccessMode::ReadWrite => property,
                AccessMode::ReadOnly => property.read_only(),
                AccessMode::WriteOnly => property.write_only(),
            });
        }
        self.visiting.pop();

        let descriptor = builder.build();
        self.registry
            .types
            .insert(name.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    fn parse(&mut self, expression: &str, owner: &str) -> Result<PropertyType> {
        let expression = expression.trim();
        if let Some(inner) = expression.strip_suffix(LIST_SUFFIX) {
            return Ok(PropertyType::List(Box::new(self.parse(inner, owner)?)));
        }
        Ok(match expression {
            "string" => PropertyType::String,
            "int" => PropertyType::Int,
            "float" => PropertyType::Float,
            "bool" => PropertyType::Bool,
            "date" => PropertyType::Date,
            "any" => PropertyType::Any,
            other => {
                if let Some(enum_type) = self.registry.enums.get(other) {
                    PropertyType::Enum(Arc::clone(enum_type))
                } else if self.document.types.contains_key(other) {
                    PropertyType::Bean(self.resolve(other)?)
                } else {
                    return Err(Error::schema(
                        format!("type '{}' refers to unknown type '{}'", owner, other),
                        Some(owner),
                    ));
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> SchemaDocument {
        serde_json::from_value(json!({
            "enums": { "Status": ["FIRST", "SECOND"] },
            "types": {
                "Domain": [
                    { "name": "extraProp", "type": "string" },
                    { "name": "enumProp", "type": "Status" },
                    { "name": "nestedProp", "type": "NestedProp" },
                    { "name": "history", "type": "Status[]" },
                    { "name": "id", "type": "int", "access": "read-only" }
                ],
                "NestedProp": [
                    { "name": "prop1", "type": "string" },
                    { "name": "secret", "type": "string", "access": "write-only" }
                ]
            }
        }))
        .unwrap()
    }

    fn schema_error(document: SchemaDocument) -> String {
        match TypeRegistry::from_document(&document).unwrap_err() {
            Error::Schema { message, .. } => message,
            other => panic!("expected a schema error, got {}", other),
        }
    }

    #[test]
    fn test_resolves_types_and_enums() {
        let registry = TypeRegistry::from_document(&document()).unwrap();
        assert_eq!(registry.type_names(), vec!["Domain", "NestedProp"]);
        assert_eq!(registry.enum_names(), vec!["Status"]);

        let domain = registry.descriptor("Domain").unwrap();
        let names: Vec<&str> = domain.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![META_PROPERTY, "extraProp", "enumProp", "nestedProp", "history", "id"]);

        assert!(domain.property("enumProp").unwrap().property_type().is_enum());
        assert_eq!(domain.property("history").unwrap().property_type().to_string(), "Status[]");
        assert!(!domain.property("id").unwrap().is_writable());

        let nested = domain.property("nestedProp").unwrap().property_type().bean_type().unwrap();
        assert!(Arc::ptr_eq(nested, registry.descriptor("NestedProp").unwrap()));
        assert!(!nested.property("secret").unwrap().is_readable());
    }

    #[test]
    fn test_record_from_json() {
        let registry = TypeRegistry::from_document(&document()).unwrap();
        let record = registry
            .record(
                "Domain",
                &json!({ "extraProp": "x", "nestedProp": { "prop1": "p" }, "history": ["FIRST"] }),
            )
            .unwrap();
        let output = record.to_json();
        assert_eq!(output["extraProp"], json!("x"));
        assert_eq!(output["nestedProp"], json!({ "prop1": "p" }));
        assert_eq!(output["history"], json!(["FIRST"]));

        assert!(registry.empty_record("Domain").unwrap().to_json()["extraProp"].is_null());
        assert!(matches!(registry.record("Missing", &json!({})), Err(Error::Schema { .. })));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut doc = document();
        doc.types
            .get_mut("Domain")
            .unwrap()
            .push(PropertySpec::new("other", "Unknown"));
        assert!(schema_error(doc).contains("unknown type 'Unknown'"));
    }

    #[test]
    fn test_name_collisions_are_rejected() {
        let mut doc = document();
        doc.types.insert("Status".into(), vec![]);
        assert!(schema_error(doc).contains("both as an enum and as a type"));

        let mut doc = document();
        doc.types.insert("string".into(), vec![]);
        assert!(schema_error(doc).contains("built-in"));
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let mut doc = document();
        doc.types
            .get_mut("NestedProp")
            .unwrap()
            .push(PropertySpec::new("prop1", "int"));
        assert!(schema_error(doc).contains("twice"));

        let mut doc = document();
        doc.enums.insert("Level".into(), vec!["LOW".into(), "LOW".into()]);
        assert!(schema_error(doc).contains("twice"));
    }

    #[test]
    fn test_meta_property_cannot_be_declared() {
        let mut doc = document();
        doc.types
            .get_mut("NestedProp")
            .unwrap()
            .push(PropertySpec::new(META_PROPERTY, "string"));
        assert!(schema_error(doc).contains("reserved"));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "types": {
                "A": [{ "name": "b", "type": "B" }],
                "B": [{ "name": "a", "type": "A[]" }]
            }
        }))
        .unwrap();
        let message = schema_error(doc);
        assert!(message.contains("circular"), "{}", message);
        assert!(message.contains("A -> B -> A"), "{}", message);
    }

    #[test]
    fn test_from_json_str_reports_parse_errors() {
        assert!(matches!(TypeRegistry::from_json_str("{"), Err(Error::Json { .. })));
        assert!(matches!(
            TypeRegistry::from_json_str(r#"{ "unknown": {} }"#),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn test_access_mode_serde() {
        let spec: PropertySpec =
            serde_json::from_value(json!({ "name": "a", "type": "int", "access": "write-only" })).unwrap();
        assert_eq!(spec, PropertySpec::new("a", "int").with_access(AccessMode::WriteOnly));
        assert_eq!(serde_json::to_value(AccessMode::ReadOnly).unwrap(), json!("read-only"));
    }
}
