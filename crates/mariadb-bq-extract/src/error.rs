//! Error types for the extract-and-load library.

use thiserror::Error;

/// Main error type for extract-and-load operations.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source database connection failure
    #[error("Connection error: {message}\n  Context: {context}")]
    Connection { message: String, context: String },

    /// Query execution failure
    #[error("Query error: {message}")]
    Query { message: String },

    /// Warehouse credentials could not be loaded or were rejected
    #[error("Auth error: {0}")]
    Auth(String),

    /// Warehouse load failure
    #[error("Upload error for table {table}: {message}")]
    Upload { table: String, message: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Create a Connection error with context about where it occurred.
    pub fn connection(message: impl Into<String>, context: impl Into<String>) -> Self {
        ExtractError::Connection {
            message: message.into(),
            context: context.into(),
        }
    }

    /// Create a Query error.
    pub fn query(message: impl Into<String>) -> Self {
        ExtractError::Query {
            message: message.into(),
        }
    }

    /// Create an Upload error.
    pub fn upload(table: impl Into<String>, message: impl Into<String>) -> Self {
        ExtractError::Upload {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for extract-and-load operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
