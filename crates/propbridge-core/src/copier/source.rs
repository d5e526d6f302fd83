//! Source descriptors: one input object plus its own copy policy

use crate::bean::{Bean, Value};
use crate::convert::{self, Converter};
use std::fmt;

/// One input object contributing values to the target
///
/// The origin is only ever read. Policies apply to every property pair derived
/// from this source and to no other source.
pub struct Source<'s> {
    origin: &'s dyn Bean,
    mapping: Vec<(String, String)>,
    converters: Vec<Converter<'s>>,
    rewrite: bool,
    skip_nulls: bool,
}

impl<'s> Source<'s> {
    /// A source with the default policy: rewrite on, skip-nulls off
    pub fn new(origin: &'s dyn Bean) -> Self {
        Self {
            origin,
            mapping: Vec::new(),
            converters: Vec::new(),
            rewrite: true,
            skip_nulls: false,
        }
    }

    pub fn origin(&self) -> &'s dyn Bean {
        self.origin
    }

    /// Explicit path pairs in insertion order
    pub fn mapping(&self) -> &[(String, String)] {
        &self.mapping
    }

    pub fn converters(&self) -> &[Converter<'s>] {
        &self.converters
    }

    /// Whether a non-null target value may be overwritten
    pub fn rewrite(&self) -> bool {
        self.rewrite
    }

    /// Whether a null source value suppresses the write
    pub fn skip_nulls(&self) -> bool {
        self.skip_nulls
    }

    /// Register `from -> to`. Re-registering a key replaces its value in place.
    pub fn insert_mapping(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        match self.mapping.iter_mut().find(|(key, _)| *key == from) {
            Some(entry) => entry.1 = to,
            None => self.mapping.push((from, to)),
        }
    }

    pub fn push_converter(&mut self, converter: Converter<'s>) {
        self.converters.push(converter);
    }

    pub fn set_rewrite(&mut self, rewrite: bool) {
        self.rewrite = rewrite;
    }

    pub fn set_skip_nulls(&mut self, skip_nulls: bool) {
        self.skip_nulls = skip_nulls;
    }

    /// Apply this source's converters in registration order
    pub fn convert(&self, value: Value) -> Value {
        convert::apply_all(&self.converters, value)
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("origin", &self.origin.descriptor().name())
            .field("mapping", &self.mapping)
            .field("converters", &self.converters.len())
            .field("rewrite", &self.rewrite)
            .field("skip_nulls", &self.skip_nulls)
            .finish()
    }
}
