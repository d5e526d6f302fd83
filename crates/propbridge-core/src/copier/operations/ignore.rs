//! Ignore strategy: first in the chain, swallows pairs naming an ignored path

use super::CopyOperation;
use crate::bean::Bean;
use crate::copier::source::Source;
use crate::Result;
use std::collections::HashSet;

/// Reports a pair as handled, without writing, when either side is ignored
#[derive(Debug)]
pub struct IgnoreOperation<'a> {
    ignores: &'a HashSet<String>,
}

impl<'a> IgnoreOperation<'a> {
    pub fn new(ignores: &'a HashSet<String>) -> Self {
        Self { ignores }
    }
}

impl CopyOperation for IgnoreOperation<'_> {
    fn name(&self) -> &'static str {
        "ignore"
    }

    fn try_copy(&self, _source: &Source<'_>, _target: &mut dyn Bean, from: &str, to: &str) -> Result<bool> {
        Ok(self.ignores.contains(from) || self.ignores.contains(to))
    }
}
