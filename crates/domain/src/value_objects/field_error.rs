//! Field-level validation error

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single validation problem tied to one request field
///
/// Field names use the inbound wire names (`city`, `kidsAges`,
/// `availability`, `maxDistance`, `preferences`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field
    pub field: String,
    /// Human-readable message suitable for display next to the form field
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
