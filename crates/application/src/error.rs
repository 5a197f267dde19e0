//! Application-level errors

use domain::FieldError;
use thiserror::Error;

/// Failure reported by a generation provider
///
/// Transport, authentication, rate-limit, timeout and server failures all
/// collapse into this one kind. The message is for logs only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Generation provider error: {message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Create a provider error with a log message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The underlying message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request payload failed validation
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Server is missing required configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider reply could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),
}
