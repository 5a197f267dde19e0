//! Domain-level errors

use thiserror::Error;

use crate::value_objects::FieldError;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Availability text was empty after trimming
    #[error("Invalid availability: {0}")]
    InvalidAvailability(String),
}

/// Report a domain error against the request field it came from
impl From<DomainError> for FieldError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidAvailability(message) => Self::new("availability", message),
        }
    }
}
