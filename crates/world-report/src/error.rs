//! Error types for report operations.

use thiserror::Error;

/// Main error type for report operations.
///
/// A failed operation always surfaces as one of these kinds; the library
/// never converts a failure into an empty result, so callers can tell
/// "zero matching rows" (an `Ok` empty collection) apart from an error.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store could not be reached within the configured retry budget.
    #[error("Database unavailable after {attempts} attempts: {message}")]
    ConnectionUnavailable { attempts: u32, message: String },

    /// A query was rejected or failed during execution.
    #[error("Query execution failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A result row did not match the expected shape for its record type.
    #[error("Row mapping failed for column `{column}`: {message}")]
    Mapping { column: String, message: String },

    /// The caller supplied invalid report parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReportError {
    /// Create a ConnectionUnavailable error.
    pub fn unavailable(attempts: u32, message: impl Into<String>) -> Self {
        ReportError::ConnectionUnavailable {
            attempts,
            message: message.into(),
        }
    }

    /// Create a Mapping error for a named column.
    pub fn mapping(column: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::Mapping {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidRequest error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ReportError::InvalidRequest(message.into())
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::Config(_) | ReportError::Yaml(_) => 2,
            ReportError::InvalidRequest(_) => 2,
            ReportError::ConnectionUnavailable { .. } => 3,
            ReportError::Query(_) => 4,
            ReportError::Mapping { .. } => 5,
            ReportError::Io(_) => 1,
        }
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
