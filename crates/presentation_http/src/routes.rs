//! Route definitions

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{error::ApiError, handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
///
/// Unknown paths answer with the JSON not-found envelope. Bodies larger than
/// `server.max_body_size_json_bytes` are rejected with 413.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/recommendations",
            post(handlers::recommendations::create_recommendations),
        )
        .route(
            "/api/recommendations/health",
            get(handlers::health::recommendations_health),
        )
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(RequestIdLayer::new())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}
