//! Error types and result aliases for fieldgen operations.
//!
//! Provides a unified error type covering schema-consistency violations,
//! malformed input documents and I/O failures, with actionable messages.

use thiserror::Error;

/// Unified error type for all fieldgen operations
#[derive(Error, Debug)]
pub enum FieldGenError {
    // Schema errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Configuration document {path} must be a mapping at the top level")]
    NotAMapping { path: String },

    // Document codec errors
    #[error("Failed to parse {path}: {message} at line {line}, column {column}")]
    YamlParse {
        path: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to serialize configuration: {message}")]
    YamlSerialize { message: String },

    // Operator interaction
    #[error("Failed to read confirmation: {message}")]
    Prompt { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for fieldgen operations
pub type FieldGenResult<T> = Result<T, FieldGenError>;

impl FieldGenError {
    /// Create an invalid-configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FieldGenError::Io { .. } | FieldGenError::Prompt { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            FieldGenError::InvalidConfig { .. } => Some(
                "Keep generated fields either under the top-level generated_fields key \
                 or inside the projects, not both",
            ),
            FieldGenError::NotAMapping { .. } => {
                Some("The config file must start with top-level keys such as 'projects'")
            },
            FieldGenError::YamlParse { .. } => Some("Fix the YAML syntax at the reported location"),
            FieldGenError::Prompt { .. } => Some("Pass --yes to run without an interactive prompt"),
            _ => None,
        }
    }
}
