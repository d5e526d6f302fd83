//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from propbridge-core library
    #[error("{0}")]
    Core(#[from] propbridge_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} ({})", path.display(), expected, reason)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core {
                propbridge_core::Error::InvalidEnumLiteral { .. } => 2,
                propbridge_core::Error::Schema { .. } => 3,
                propbridge_core::Error::Document { .. } => 4,
                propbridge_core::Error::Plan { .. } => 5,
                propbridge_core::Error::Json { .. } => 6,
            },
            Self::FileNotFound { .. } => 7,
            Self::InvalidFormat { .. } => 8,
            Self::Config(_) => 9,
            Self::Json(_) => 10,
            Self::Yaml(_) => 11,
            Self::Other { .. } => 99,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let mut message = error.to_string();
    if let Error::Core(propbridge_core::Error::Schema {
        type_name: Some(type_name),
        ..
    }) = error
    {
        message.push_str(&format!(" (in type '{}')", type_name));
    }

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), message)
    } else {
        format!("Error: {}", message)
    }
}
