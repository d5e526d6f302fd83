//! Default strategy: plain copy through the source's converters
//!
//! A pair is handled when both paths are declared, the source path can be
//! read, and the rewrite policy lets the write happen. A null or unreadable
//! parent on the source side, or a null source value with skip-nulls set,
//! leaves the pair unhandled. A write the target refuses (read-only, type mismatch, null
//! parent) still counts as handled.

use super::{both_declared, may_overwrite, write, CopyOperation};
use crate::bean::{Access, Bean};
use crate::copier::path;
use crate::copier::source::Source;
use crate::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultOperation;

impl CopyOperation for DefaultOperation {
    fn name(&self) -> &'static str {
        "default"
    }

    fn try_copy(&self, source: &Source<'_>, target: &mut dyn Bean, from: &str, to: &str) -> Result<bool> {
        if !both_declared(source, target, from, to) {
            return Ok(false);
        }
        let Access::Ok(value) = path::read(source.origin(), from) else {
            return Ok(false);
        };
        if value.is_null() && source.skip_nulls() {
            return Ok(false);
        }
        if !may_overwrite(source, target, to) {
            return Ok(false);
        }
        write(target, to, source.convert(value));
        Ok(true)
    }
}
