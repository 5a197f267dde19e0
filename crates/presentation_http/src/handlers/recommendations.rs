//! Recommendation handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use domain::RecommendationResult;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Successful recommendation response
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub data: RecommendationResult,
}

/// Run the recommendation pipeline for a form submission
///
/// The body is taken as untyped JSON so that missing or mistyped fields
/// surface as field errors rather than a generic deserialization failure.
#[instrument(skip(state, payload))]
pub async fn create_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let Json(input) = payload?;

    let result = state.recommendation_service.recommend(&input).await?;

    info!(
        city = %result.metadata.city,
        recommendation_count = result.len(),
        degraded = result.is_degraded(),
        "Recommendations generated"
    );

    Ok(Json(RecommendationsResponse {
        success: true,
        data: result,
    }))
}
