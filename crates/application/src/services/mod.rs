//! Application services - Use case implementations

mod prompt_builder;
mod recommendation_service;
mod response_parser;

pub use prompt_builder::{PromptBuilder, RECOMMENDATION_COUNT};
pub use recommendation_service::{GENERATION_TIMEOUT, RecommendationService};
pub use response_parser::{ParsedRecommendations, ResponseParser};
