//! Domain entities - Search criteria and the recommendations produced for them

mod activity_query;
mod activity_recommendation;
mod recommendation_result;

pub use activity_query::{ActivityQuery, MAX_CHILD_AGE, MAX_DISTANCE_MILES, MIN_DISTANCE_MILES};
pub use activity_recommendation::ActivityRecommendation;
pub use recommendation_result::{RecommendationMetadata, RecommendationResult};
