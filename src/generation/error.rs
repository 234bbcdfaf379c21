//! Error types and handling
//!
//! This module contains the error type shared by every stage of a generation run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::{ConfigError, ConfigValidationError};

/// Errors that can occur during a generation run
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration is invalid or contradictory
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A configuration value failed validation
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),

    /// Configuration file could not be loaded
    #[error("Configuration loading failed: {0}")]
    ConfigFileError(#[from] ConfigError),

    /// Filesystem operation failed
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    IoError {
        /// Operation that failed (create, write, read, rename, ...)
        operation: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// CSV encoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Internal precondition broken before output was written
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl GeneratorError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an invariant violation
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Build a mapper attaching the operation and path to an I/O error
    ///
    /// ```rust
    /// use identity_profile_generator::generation::GeneratorError;
    /// use std::path::Path;
    ///
    /// let result = std::fs::read("/no/such/file").map_err(GeneratorError::io("read", Path::new("/no/such/file")));
    /// assert!(result.unwrap_err().to_string().starts_with("Failed to read '/no/such/file'"));
    /// ```
    pub fn io(operation: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::IoError { operation, path, source }
    }

    /// Whether the error was raised before any generation work started
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GeneratorError::ConfigurationError(_)
                | GeneratorError::ValidationError(_)
                | GeneratorError::ConfigFileError(_)
        )
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            GeneratorError::ConfigurationError(_) => "Configuration",
            GeneratorError::ValidationError(_) => "Configuration",
            GeneratorError::ConfigFileError(_) => "Configuration",
            GeneratorError::IoError { .. } => "IO",
            GeneratorError::CsvError(_) => "Serialization",
            GeneratorError::SerializationError(_) => "Serialization",
            GeneratorError::InvariantViolation(_) => "Invariant",
        }
    }
}

/// Result type for generation operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(GeneratorError::configuration_error("bad").category(), "Configuration");
        assert_eq!(
            GeneratorError::from(ConfigValidationError::InvalidCount(0)).category(),
            "Configuration"
        );
        assert_eq!(GeneratorError::invariant_violation("empty").category(), "Invariant");

        let io_error = GeneratorError::io("write", Path::new("out.csv"))(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(io_error.category(), "IO");
        assert!(!io_error.is_configuration());
    }

    #[test]
    fn test_io_error_names_path_and_operation() {
        let error = GeneratorError::io("rename", Path::new("/tmp/clusters.csv"))(io::Error::new(
            io::ErrorKind::Other,
            "disk full",
        ));
        assert_eq!(error.to_string(), "Failed to rename '/tmp/clusters.csv': disk full");
    }

    #[test]
    fn test_validation_error_message() {
        let error = GeneratorError::from(ConfigValidationError::InvalidCount(0));
        assert!(error.is_configuration());
        assert_eq!(
            error.to_string(),
            "Configuration validation failed: Count must be greater than 0, got 0"
        );
    }
}
