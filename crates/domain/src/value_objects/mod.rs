//! Value Objects - Immutable, identity-less domain primitives

mod availability;
mod field_error;

pub use availability::{AVAILABILITY_REQUIRED, Availability, AvailabilitySlot};
pub use field_error::FieldError;
