//! Copy orchestration
//!
//! A [`Copier`] owns one target, an ordered list of [`Source`]s, and an ignore
//! set shared by every source. [`Copier::execute`] merges the sources into the
//! target in the order they were added. For each source it runs three passes:
//!
//! 1. every property the origin's declared type exposes, copied to the same name
//! 2. every mapping entry `from -> to`
//! 3. every mapping entry reversed, `to -> from`
//!
//! Each pair goes through the [`OperationChain`] from scratch, so a later pass
//! (or a later source) may overwrite an earlier write when its rewrite policy
//! allows it.
//!
//! # Module Organization
//!
//! - [`path`] - Dotted path resolution over beans
//! - [`source`] - Per-source policy
//! - [`operations`] - The copy strategies and their chain
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

pub mod operations;
pub mod path;
pub mod source;


pub use operations::{CopyOperation, OperationChain};
pub use source::Source;

use crate::bean::{Bean, Value, META_PROPERTY};
use crate::convert::Converter;
use crate::Result;
use std::collections::HashSet;
use tracing::{debug, debug_span};

/// Merges one or more sources into a single target
///
/// ```
/// use propbridge_core::bean::{PropertyType, Record, TypeDescriptor};
/// use propbridge_core::Copier;
///
/// let person = TypeDescriptor::builder("Person")
///     .property("name", PropertyType::String)
///     .build();
/// let contact = TypeDescriptor::builder("Contact")
///     .property("displayName", PropertyType::String)
///     .build();
///
/// let from = Record::new(person).with("name", "Ada");
/// let copied = Copier::new(Record::new(contact))
///     .source(&from)
///     .map("name", "displayName")
///     .execute()
///     .unwrap()
///     .unwrap();
/// assert_eq!(copied.value("displayName").as_str(), Some("Ada"));
/// ```
pub struct Copier<'s, T: Bean> {
    target: Option<T>,
    sources: Vec<Source<'s>>,
    ignores: HashSet<String>,
}

impl<'s, T: Bean> Copier<'s, T> {
    /// A copier writing into `target`
    pub fn new(target: T) -> Self {
        Self::with_target(Some(target))
    }

    /// A copier whose target may be missing; executing it without a target
    /// yields `None`
    pub fn with_target(target: Option<T>) -> Self {
        Self {
            target,
            sources: Vec::new(),
            ignores: HashSet::from([META_PROPERTY.to_string()]),
        }
    }

    /// Add a source and return a handle for configuring its policy
    pub fn source(self, origin: &'s dyn Bean) -> SourceBuilder<'s, T> {
        SourceBuilder {
            copier: self,
            source: Source::new(origin),
        }
    }

    /// Add an already configured source
    pub fn with_source(mut self, source: Source<'s>) -> Self {
        self.sources.push(source);
        self
    }

    /// Exclude paths from copying, on either side of a pair, for every source
    pub fn ignore<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn ignores(&self) -> &HashSet<String> {
        &self.ignores
    }

    pub fn sources(&self) -> &[Source<'s>] {
        &self.sources
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Run every source against the target and hand the target back
    ///
    /// Returns `Ok(None)` without doing anything when there is no target or no
    /// source. The only error is [`crate::Error::InvalidEnumLiteral`]; it stops
    /// the copy at the offending pair and the partly written target is dropped,
    /// so callers that need the original should keep a clone.
    pub fn execute(self) -> Result<Option<T>> {
        let Copier {
            target,
            sources,
            ignores,
        } = self;
        let Some(mut target) = target else {
            debug!("no target, nothing to copy");
            return Ok(None);
        };
        if sources.is_empty() {
            debug!("no sources, nothing to copy");
            return Ok(None);
        }

        let chain = OperationChain::standard(&ignores);
        for (index, source) in sources.iter().enumerate() {
            let span = debug_span!(
                "source",
                index,
                origin = source.origin().descriptor().name(),
                target = target.descriptor().name()
            );
            let _enter = span.enter();
            apply_source(&chain, source, &mut target)?;
        }

        Ok(Some(target))
    }
}

/// The three passes for one source
fn apply_source(chain: &OperationChain<'_>, source: &Source<'_>, target: &mut dyn Bean) -> Result<()> {
    let matched = source
        .origin()
        .descriptor()
        .properties()
        .iter()
        .map(|property| (property.name(), property.name()));
    let forward = source.mapping().iter().map(|(from, to)| (from.as_str(), to.as_str()));
    let inverse = source.mapping().iter().map(|(from, to)| (to.as_str(), from.as_str()));

    let mut attempted = 0usize;
    let mut handled = 0usize;
    for (from, to) in matched.chain(forward).chain(inverse) {
        attempted += 1;
        if chain.copy(source, target, from, to)?.is_some() {
            handled += 1;
        }
    }

    debug!(attempted, handled, "source applied");
    Ok(())
}

/// Configuration handle for the most recently added source
///
/// Obtained from [`Copier::source`]. Per-source settings are only reachable
/// through this handle; [`SourceBuilder::done`] commits the source and returns
/// the copier.
pub struct SourceBuilder<'s, T: Bean> {
    copier: Copier<'s, T>,
    source: Source<'s>,
}

impl<'s, T: Bean> SourceBuilder<'s, T> {
    /// Map `from` on the origin to `to` on the target; the reverse direction
    /// is attempted too
    pub fn map(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.source.insert_mapping(from, to);
        self
    }

    /// Add several mapping entries at once
    pub fn map_all<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (from, to) in entries {
            self.source.insert_mapping(from, to);
        }
        self
    }

    /// Append a converter applied to every plain copy from this source
    pub fn converter(mut self, converter: impl Fn(Value) -> Value + 's) -> Self {
        self.source.push_converter(Box::new(converter));
        self
    }

    /// Append an already boxed converter, e.g. from [`crate::convert::built_in`]
    pub fn boxed_converter(mut self, converter: Converter<'s>) -> Self {
        self.source.push_converter(converter);
        self
    }

    pub fn rewrite(mut self, rewrite: bool) -> Self {
        self.source.set_rewrite(rewrite);
        self
    }

    pub fn skip_nulls(mut self, skip_nulls: bool) -> Self {
        self.source.set_skip_nulls(skip_nulls);
        self
    }

    /// Same as [`Copier::ignore`]
    pub fn ignore<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.copier = self.copier.ignore(names);
        self
    }

    /// Commit this source and return to the copier
    pub fn done(self) -> Copier<'s, T> {
        self.copier.with_source(self.source)
    }

    /// Commit this source and start the next one
    pub fn source(self, origin: &'s dyn Bean) -> SourceBuilder<'s, T> {
        self.done().source(origin)
    }

    /// Commit this source and run the copy
    pub fn execute(self) -> Result<Option<T>> {
        self.done().execute()
    }
}
