//! Error types for the Propbridge core library
//!
//! Access and shape problems (unknown properties, null intermediates, rejected
//! writes) are never errors: the engine copies whatever overlaps. The variants
//! below cover the cases that must stay loud.

use thiserror::Error;

/// Main error type for Propbridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// A string did not name any member of the target enumeration
    #[error("Invalid enum literal '{literal}' for {enum_name} at '{path}' (expected one of: {})", .expected.join(", "))]
    InvalidEnumLiteral {
        enum_name: String,
        literal: String,
        path: String,
        expected: Vec<String>,
    },

    /// Schema document could not be resolved into type descriptors
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        type_name: Option<String>,
    },

    /// A JSON document does not fit its declared type
    #[error("Document error at '{path}': {message}")]
    Document { path: String, message: String },

    /// Copy plan is inconsistent with the registry or its inputs
    #[error("Plan error: {message}")]
    Plan { message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn schema(message: impl Into<String>, type_name: Option<&str>) -> Self {
        Error::Schema {
            message: message.into(),
            type_name: type_name.map(str::to_string),
        }
    }

    pub(crate) fn document(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Document {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn plan(message: impl Into<String>) -> Self {
        Error::Plan {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
