//! Family Activity Finder HTTP presentation layer
//!
//! Exposes the recommendation pipeline as a JSON API for the web client.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestIdLayer, SecurityHeadersLayer};
pub use routes::create_router;
pub use state::AppState;
