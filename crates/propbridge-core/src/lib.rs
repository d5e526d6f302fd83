//! Propbridge Core - property-copy engine for runtime-shaped objects
//!
//! This crate copies values between structured objects whose properties are
//! discovered at runtime. One or more sources are merged into a single target
//! under per-source policies: explicit path mappings (applied in both
//! directions), rewrite vs. preserve-existing, null skipping, converters, and
//! enum/string coercion.
//!
//! # Main Components
//!
//! - **Beans**: the [`Bean`] accessor trait, [`Value`], declared types, and the
//!   dynamic [`Record`]
//! - **Copier**: [`Copier`] orchestration over a chain of copy strategies
//! - **Converters**: value transformations applied on plain copies
//! - **Schema and plans**: declared types and copy configuration as data
//!
//! # Example
//!
//! ```
//! use propbridge_core::bean::{EnumType, PropertyType, Record, TypeDescriptor, Value};
//! use propbridge_core::{Copier, Result};
//!
//! fn example() -> Result<()> {
//!     let status = EnumType::new("Status", ["FIRST", "SECOND"]);
//!     let domain = TypeDescriptor::builder("Domain")
//!         .property("extraProp", PropertyType::String)
//!         .property("enumProp", PropertyType::Enum(status.clone()))
//!         .build();
//!     let dto = TypeDescriptor::builder("Dto")
//!         .property("extraProp", PropertyType::String)
//!         .property("enumProp", PropertyType::String)
//!         .build();
//!
//!     let from = Record::new(domain)
//!         .with("extraProp", "x")
//!         .with("enumProp", status.value_of("SECOND"));
//!     let copied = Copier::new(Record::new(dto)).source(&from).execute()?;
//!
//!     let copied = copied.expect("target and source were given");
//!     assert_eq!(copied.value("enumProp"), &Value::from("SECOND"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

pub mod bean;
pub mod convert;
pub mod copier;
pub mod error;
pub mod plan;
pub mod schema;

// Re-export main types for convenience
pub use bean::{Access, Bean, PropertyType, Record, TypeDescriptor, Value};
pub use convert::Converter;
pub use copier::{Copier, CopyOperation, OperationChain, Source, SourceBuilder};
pub use error::{Error, Result};
pub use plan::{CopyPlan, SourcePlan};
pub use schema::{SchemaDocument, TypeRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Copy every matching property of `from` into `target`
///
/// Single source, default policy (rewrite on, nulls copied), with `ignore`
/// added to the always-ignored meta-property.
pub fn copy<T: Bean>(from: &dyn Bean, target: T, ignore: &[&str]) -> Result<Option<T>> {
    Copier::new(target)
        .ignore(ignore.iter().copied())
        .source(from)
        .execute()
}
