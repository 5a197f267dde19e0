//! Health check handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Service name reported by the root health check
pub const SERVICE_NAME: &str = "family-activity-finder-backend";

/// Service name reported by the recommendations health check
pub const RECOMMENDATIONS_SERVICE_NAME: &str = "recommendations-api";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    fn healthy(service: &str, version: Option<&str>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.to_string(),
            version: version.map(str::to_string),
            timestamp: Utc::now(),
        }
    }
}

/// Liveness check for the whole server
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        SERVICE_NAME,
        Some(env!("CARGO_PKG_VERSION")),
    ))
}

/// Liveness check scoped to the recommendations API
///
/// Does not contact the generation provider.
pub async fn recommendations_health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(RECOMMENDATIONS_SERVICE_NAME, None))
}
