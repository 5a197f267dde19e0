//! Tracing subscriber setup
//!
//! Installs a global `tracing` subscriber writing to stdout as text or JSON.

mod subscriber;

pub use subscriber::{TelemetryError, build_env_filter, init_tracing};
