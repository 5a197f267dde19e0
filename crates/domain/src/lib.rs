//! Domain layer for the Family Activity Finder
//!
//! Contains the search criteria, recommendation entities, and the input
//! validator that is the only way to obtain an [`ActivityQuery`].
//! This layer has no knowledge of HTTP or of the generation provider.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
