//! Enum coercion strategy: enum to its member name, and string to enum member
//!
//! Applies only when the declared types of the two final segments form an
//! enum/string pair and the source path can be read. It honours the rewrite
//! policy but not skip-nulls: a null source value is written as null even when
//! the source asked to skip nulls. A null parent on the source side is not a
//! null value and leaves the pair unhandled.
//! Converters are not applied on this path.

use super::{both_declared, may_overwrite, write, CopyOperation};
use crate::bean::{Access, Bean, PropertyType, Value};
use crate::copier::path;
use crate::copier::source::Source;
use crate::{Error, Result};

/// Coerces between enum-typed and string-typed properties
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumCoercionOperation;

impl CopyOperation for EnumCoercionOperation {
    fn name(&self) -> &'static str {
        "enum_coercion"
    }

    fn try_copy(&self, source: &Source<'_>, target: &mut dyn Bean, from: &str, to: &str) -> Result<bool> {
        if !both_declared(source, target, from, to) {
            return Ok(false);
        }
        let Access::Ok(value) = path::read(source.origin(), from) else {
            return Ok(false);
        };
        if !may_overwrite(source, target, to) {
            return Ok(false);
        }
        let (Some(from_type), Some(to_type)) = (
            path::declared_type(source.origin(), from),
            path::declared_type(target, to).cloned(),
        ) else {
            return Ok(false);
        };

        match (from_type, &to_type) {
            (PropertyType::Enum(_), PropertyType::String) => {
                let text = value.as_text().map_or(Value::Null, Value::Str);
                write(target, to, text);
                Ok(true)
            }
            (PropertyType::String, PropertyType::Enum(enum_type)) => {
                let member = match value.as_text() {
                    None => Value::Null,
                    Some(literal) => match enum_type.value_of(&literal) {
                        Some(member) => Value::Enum(member),
                        None => {
                            return Err(Error::InvalidEnumLiteral {
                                enum_name: enum_type.name().to_string(),
                                literal,
                                path: to.to_string(),
                                expected: enum_type.members().to_vec(),
                            })
                        }
                    },
                };
                write(target, to, member);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
