//! Application layer - Use cases and orchestration
//!
//! Contains the recommendation pipeline (prompt building, response parsing,
//! orchestration) and the port through which it reaches a generation
//! provider. Adapters in the infrastructure layer implement the port.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, ProviderError};
pub use ports::*;
pub use services::*;
