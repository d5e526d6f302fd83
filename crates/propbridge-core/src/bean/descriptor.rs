//! Declared shapes: type, property, and enumeration descriptors
//!
//! Descriptors describe what a bean *declares*, independent of the values an
//! instance currently holds. Path existence checks and enum coercion consult
//! these and never the runtime value.
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use super::value::Value;
use std::fmt;
use std::sync::Arc;

/// Name of the meta-property every type exposes for its own type name
pub const META_PROPERTY: &str = "class";

/// An enumeration: a name plus its ordered member names
#[derive(Debug, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    /// Create a shared enumeration type
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member names in declaration order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Look up a member by its exact (case-sensitive) name
    pub fn value_of(self: &Arc<Self>, literal: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .position(|m| m == literal)
            .map(|ordinal| EnumValue {
                ty: Arc::clone(self),
                ordinal,
            })
    }

    /// Member at the given ordinal
    pub fn value(self: &Arc<Self>, ordinal: usize) -> Option<EnumValue> {
        (ordinal < self.members.len()).then(|| EnumValue {
            ty: Arc::clone(self),
            ordinal,
        })
    }
}

/// One member of an [`EnumType`]
#[derive(Debug, Clone)]
pub struct EnumValue {
    ty: Arc<EnumType>,
    ordinal: usize,
}

impl EnumValue {
    pub fn name(&self) -> &str {
        &self.ty.members[self.ordinal]
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal
            && (Arc::ptr_eq(&self.ty, &other.ty) || self.ty == other.ty)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a property
#[derive(Debug, Clone)]
pub enum PropertyType {
    Bool,
    Int,
    Float,
    String,
    Date,
    Enum(Arc<EnumType>),
    Bean(Arc<TypeDescriptor>),
    List(Box<PropertyType>),
    /// Accepts any value
    Any,
}

impl PropertyType {
    pub fn is_enum(&self) -> bool {
        matches!(self, PropertyType::Enum(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, PropertyType::String)
    }

    pub fn enum_type(&self) -> Option<&Arc<EnumType>> {
        match self {
            PropertyType::Enum(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn bean_type(&self) -> Option<&Arc<TypeDescriptor>> {
        match self {
            PropertyType::Bean(ty) => Some(ty),
            _ => None,
        }
    }

    /// Whether a value may be stored in a property of this type.
    /// `Null` fits every type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (PropertyType::Any, _) => true,
            (PropertyType::Bool, Value::Bool(_))
            | (PropertyType::Int, Value::Int(_))
            | (PropertyType::Float, Value::Float(_))
            | (PropertyType::String, Value::Str(_))
            | (PropertyType::Date, Value::Date(_)) => true,
            (PropertyType::Enum(ty), Value::Enum(v)) => v.enum_type().name() == ty.name(),
            (PropertyType::Bean(ty), Value::Bean(b)) => b.descriptor().name() == ty.name(),
            (PropertyType::List(inner), Value::List(items)) => {
                items.iter().all(|item| inner.accepts(item))
            }
            _ => false,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Bool => write!(f, "bool"),
            PropertyType::Int => write!(f, "int"),
            PropertyType::Float => write!(f, "float"),
            PropertyType::String => write!(f, "string"),
            PropertyType::Date => write!(f, "date"),
            PropertyType::Enum(ty) => write!(f, "{}", ty.name()),
            PropertyType::Bean(ty) => write!(f, "{}", ty.name()),
            PropertyType::List(inner) => write!(f, "{}[]", inner),
            PropertyType::Any => write!(f, "any"),
        }
    }
}

/// A single declared property
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    ty: PropertyType,
    readable: bool,
    writable: bool,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: true,
            writable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> &PropertyType {
        &self.ty
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

/// Declared shape of a bean type
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    /// Start describing a type
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared properties, the meta-property first
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Builder for [`TypeDescriptor`]
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Declare a read-write property
    pub fn property(self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.descriptor(PropertyDescriptor::new(name, ty))
    }

    /// Declare a property with no setter
    pub fn read_only(self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.descriptor(PropertyDescriptor::new(name, ty).read_only())
    }

    /// Declare a property with no getter
    pub fn write_only(self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.descriptor(PropertyDescriptor::new(name, ty).write_only())
    }

    /// Declare a fully configured property; a later declaration replaces an
    /// earlier one with the same name
    pub fn descriptor(mut self, descriptor: PropertyDescriptor) -> Self {
        self.properties.retain(|p| p.name != descriptor.name);
        self.properties.push(descriptor);
        self
    }

    pub fn build(self) -> Arc<TypeDescriptor> {
        let mut properties = Vec::with_capacity(self.properties.len() + 1);
        properties.push(PropertyDescriptor::new(META_PROPERTY, PropertyType::String).read_only());
        properties.extend(
            self.properties
                .into_iter()
                .filter(|p| p.name != META_PROPERTY),
        );
        Arc::new(TypeDescriptor {
            name: self.name,
            properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Arc<EnumType> {
        EnumType::new("Status", ["FIRST", "SECOND"])
    }

    #[test]
    fn test_enum_lookup_is_case_sensitive() {
        let ty = status();
        assert_eq!(ty.value_of("SECOND").map(|v| v.ordinal()), Some(1));
        assert!(ty.value_of("second").is_none());
        assert!(ty.value_of("").is_none());
        assert!(ty.value(2).is_none());
    }

    #[test]
    fn test_enum_value_equality_across_instances() {
        let a = status();
        let b = status();
        assert_eq!(a.value_of("FIRST"), b.value_of("FIRST"));
        assert_ne!(a.value_of("FIRST"), a.value_of("SECOND"));

        let other = EnumType::new("Other", ["FIRST"]);
        assert_ne!(a.value_of("FIRST"), other.value_of("FIRST"));
    }

    #[test]
    fn test_builder_prepends_meta_property() {
        let ty = TypeDescriptor::builder("Dto")
            .property("name", PropertyType::String)
            .read_only("id", PropertyType::Int)
            .build();

        let names: Vec<_> = ty.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![META_PROPERTY, "name", "id"]);
        assert!(!ty.property(META_PROPERTY).unwrap().is_writable());
        assert!(!ty.property("id").unwrap().is_writable());
        assert!(ty.property("missing").is_none());
    }

    #[test]
    fn test_builder_replaces_duplicate_declaration() {
        let ty = TypeDescriptor::builder("Dto")
            .property("name", PropertyType::String)
            .property("name", PropertyType::Int)
            .build();

        assert_eq!(ty.properties().len(), 2);
        assert!(matches!(ty.property("name").unwrap().property_type(), PropertyType::Int));
    }

    #[test]
    fn test_accepts() {
        let ty = status();
        let enum_ty = PropertyType::Enum(ty.clone());

        assert!(PropertyType::String.accepts(&Value::Null));
        assert!(PropertyType::String.accepts(&Value::from("x")));
        assert!(!PropertyType::String.accepts(&Value::Int(1)));
        assert!(enum_ty.accepts(&Value::Enum(ty.value_of("FIRST").unwrap())));
        assert!(!enum_ty.accepts(&Value::from("FIRST")));
        assert!(PropertyType::Any.accepts(&Value::Float(1.5)));
        assert!(PropertyType::List(Box::new(PropertyType::Int))
            .accepts(&Value::List(vec![Value::Int(1), Value::Null])));
        assert!(!PropertyType::List(Box::new(PropertyType::Int))
            .accepts(&Value::List(vec![Value::from("a")])));
    }

    #[test]
    fn test_property_type_display() {
        assert_eq!(PropertyType::List(Box::new(PropertyType::Enum(status()))).to_string(), "Status[]");
        assert_eq!(PropertyType::Date.to_string(), "date");
    }
}
