//! Pipeline output: recommendations plus a snapshot of the query

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityQuery, ActivityRecommendation};

/// Echo of the search criteria and provenance of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationMetadata {
    pub city: String,
    pub kids_ages: String,
    pub availability: String,
    pub max_distance: u8,
    pub generated_at: DateTime<Utc>,
    /// Set when the recommendations came from a fallback path
    pub degraded: bool,
}

/// Recommendations for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<ActivityRecommendation>,
    pub metadata: RecommendationMetadata,
}

impl RecommendationResult {
    /// Build a result for `query`, stamped with the current time
    pub fn new(
        query: &ActivityQuery,
        recommendations: Vec<ActivityRecommendation>,
        degraded: bool,
    ) -> Self {
        Self {
            recommendations,
            metadata: RecommendationMetadata {
                city: query.city().to_string(),
                kids_ages: query.ages_label(),
                availability: query.availability().to_string(),
                max_distance: query.max_distance_miles(),
                generated_at: Utc::now(),
                degraded,
            },
        }
    }

    /// Whether a fallback path produced this result
    pub const fn is_degraded(&self) -> bool {
        self.metadata.degraded
    }

    /// Number of recommendations
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    /// True when there are no recommendations
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
