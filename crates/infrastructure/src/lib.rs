//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the Anthropic generation adapter, configuration loading and
//! tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, ServerConfig};
pub use telemetry::{TelemetryError, build_env_filter, init_tracing};
