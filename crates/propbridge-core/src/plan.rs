//! Declarative copy plans
//!
//! A [`CopyPlan`] describes one copy in data: the target type, names ignored
//! across all sources, and one [`SourcePlan`] per input document. Running a plan
//! builds [`crate::bean::Record`]s through a [`TypeRegistry`] and drives a
//! [`Copier`] exactly as the builder API would.
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

use crate::bean::Record;
use crate::convert::built_in;
use crate::copier::Copier;
use crate::schema::TypeRegistry;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A copy described as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyPlan {
    /// Name of the target type
    pub target: String,

    /// Paths never copied, on either side of a pair
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// Sources in application order
    #[serde(default)]
    pub sources: Vec<SourcePlan>,
}

/// Policy for one source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcePlan {
    /// Name of the source document's type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Path pairs, applied in both directions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mapping: BTreeMap<String, String>,

    #[serde(default = "default_rewrite")]
    pub rewrite: bool,

    #[serde(default)]
    pub skip_nulls: bool,

    /// Built-in converter names, applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub converters: Vec<String>,
}

fn default_rewrite() -> bool {
    true
}

impl SourcePlan {
    /// A source of `type_name` with the default policy
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            mapping: BTreeMap::new(),
            rewrite: true,
            skip_nulls: false,
            converters: Vec::new(),
        }
    }
}

impl CopyPlan {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ignore: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Parse a plan from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that every referenced type and converter exists
    pub fn validate(&self, registry: &TypeRegistry) -> Result<()> {
        if registry.descriptor(&self.target).is_none() {
            return Err(Error::plan(format!("unknown target type '{}'", self.target)));
        }
        for (index, source) in self.sources.iter().enumerate() {
            if registry.descriptor(&source.type_name).is_none() {
                return Err(Error::plan(format!(
                    "source #{} has unknown type '{}'",
                    index + 1,
                    source.type_name
                )));
            }
            if let Some(name) = source
                .converters
                .iter()
                .find(|name| built_in::by_name(name).is_none())
            {
                return Err(Error::plan(format!(
                    "source #{} uses unknown converter '{}' (known: {})",
                    index + 1,
                    name,
                    built_in::NAMES.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Run the plan. `source_docs` pairs up with `sources` by position; a
    /// missing target document starts from an empty record.
    ///
    /// Returns `Ok(None)` when the plan has no sources.
    pub fn run(
        &self,
        registry: &TypeRegistry,
        target_doc: Option<&Json>,
        source_docs: &[Json],
    ) -> Result<Option<Json>> {
        self.validate(registry)?;
        if source_docs.len() != self.sources.len() {
            return Err(Error::plan(format!(
                "plan declares {} source(s) but {} document(s) were given",
                self.sources.len(),
                source_docs.len()
            )));
        }

        let target = match target_doc {
            Some(doc) => registry.record(&self.target, doc)?,
            None => registry.empty_record(&self.target)?,
        };
        let origins = self
            .sources
            .iter()
            .zip(source_docs)
            .map(|(source, doc)| registry.record(&source.type_name, doc))
            .collect::<Result<Vec<Record>>>()?;

        let mut copier = Copier::new(target).ignore(self.ignore.iter().cloned());
        for (source, origin) in self.sources.iter().zip(&origins) {
            let mut builder = copier
                .source(origin)
                .map_all(&source.mapping)
                .rewrite(source.rewrite)
                .skip_nulls(source.skip_nulls);
            for name in &source.converters {
                let converter = built_in::by_name(name)
                    .ok_or_else(|| Error::plan(format!("unknown converter '{}'", name)))?;
                builder = builder.boxed_converter(converter);
            }
            copier = builder.done();
            debug!(source = %source.type_name, "source planned");
        }

        let copied = copier.execute()?;
        info!(target = %self.target, sources = self.sources.len(), "plan executed");
        Ok(copied.map(|record| record.to_json()))
    }
}
