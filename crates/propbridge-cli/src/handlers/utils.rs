//! Shared utilities for command handlers

use crate::config::is_yaml;
use crate::error::{Error, Result};
use propbridge_core::{CopyPlan, SchemaDocument, TypeRegistry};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a JSON or YAML document, picking the parser by file extension
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Loaded document");

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            reason: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Load and resolve a schema file
pub fn load_registry(path: &Path) -> Result<TypeRegistry> {
    let document: SchemaDocument = load_document(path)?;
    Ok(TypeRegistry::from_document(&document)?)
}

/// Load a copy plan file
pub fn load_plan(path: &Path) -> Result<CopyPlan> {
    load_document(path)
}
