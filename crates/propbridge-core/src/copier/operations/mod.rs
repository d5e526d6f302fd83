//! Per-property copy strategies evaluated as a chain of responsibility
//!
//! For each `(from, to)` pair the chain asks its operations in order; the first
//! one reporting the pair as handled ends the evaluation for that pair. A pair
//! nobody handles is silently skipped.
//!
//! # Module Organization
//!
//! - [`ignore`] - Swallows pairs naming an ignored path
//! - [`enum_coercion`] - Enum to string and string to enum
//! - [`default`] - Plain copy honouring rewrite, skip-nulls, and converters
//!
//! Copyright (c) 2025 Propbridge Team
//! Licensed under the Apache-2.0 license

pub mod default;
pub mod enum_coercion;
pub mod ignore;

pub use default::DefaultOperation;
pub use enum_coercion::EnumCoercionOperation;
pub use ignore::IgnoreOperation;

use super::path;
use super::source::Source;
use crate::bean::{Access, Bean, Value};
use crate::Result;
use std::collections::HashSet;
use tracing::{debug, trace};

/// A single copy strategy
pub trait CopyOperation {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to copy `from` on the source's origin to `to` on `target`.
    ///
    /// Returns `Ok(true)` when the pair was handled (written or deliberately
    /// swallowed) and the chain must stop.
    fn try_copy(&self, source: &Source<'_>, target: &mut dyn Bean, from: &str, to: &str) -> Result<bool>;
}

/// Ordered list of copy operations
pub struct OperationChain<'a> {
    operations: Vec<Box<dyn CopyOperation + 'a>>,
}

impl<'a> OperationChain<'a> {
    /// An empty chain that handles nothing
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// The fixed chain: ignore, then enum coercion, then default copy
    pub fn standard(ignores: &'a HashSet<String>) -> Self {
        Self::new()
            .with_operation(IgnoreOperation::new(ignores))
            .with_operation(EnumCoercionOperation)
            .with_operation(DefaultOperation)
    }

    /// Append an operation at the end of the chain
    pub fn with_operation(mut self, operation: impl CopyOperation + 'a) -> Self {
        self.operations.push(Box::new(operation));
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Names of the operations in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|op| op.name()).collect()
    }

    /// Run the chain for one pair; returns the name of the operation that
    /// handled it, if any
    pub fn copy(
        &self,
        source: &Source<'_>,
        target: &mut dyn Bean,
        from: &str,
        to: &str,
    ) -> Result<Option<&'static str>> {
        for operation in &self.operations {
            if operation.try_copy(source, target, from, to)? {
                trace!(from, to, operation = operation.name(), "pair handled");
                return Ok(Some(operation.name()));
            }
        }
        trace!(from, to, "pair skipped");
        Ok(None)
    }
}

impl Default for OperationChain<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Both sides declare their path
fn both_declared(source: &Source<'_>, target: &dyn Bean, from: &str, to: &str) -> bool {
    path::has_path(source.origin(), from) && path::has_path(target, to)
}

/// Whether the source's rewrite policy lets it write `to` right now
fn may_overwrite(source: &Source<'_>, target: &dyn Bean, to: &str) -> bool {
    source.rewrite() || path::resolve(target, to).is_none()
}

/// Write through the path resolver; a refused write counts as never happened
fn write(target: &mut dyn Bean, to: &str, value: Value) {
    match path::assign(target, to, value) {
        Access::Ok(()) => {}
        Access::Absent => debug!(path = to, "write skipped, parent is null"),
        Access::Denied(reason) => debug!(path = to, %reason, "write denied"),
    }
}
