//! Application state shared across handlers

use std::sync::Arc;

use application::RecommendationService;
use infrastructure::{AnthropicGenerationAdapter, AppConfig};
use tracing::{error, info};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Recommendation pipeline
    pub recommendation_service: Arc<RecommendationService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from an already built service
    pub fn new(recommendation_service: RecommendationService, config: AppConfig) -> Self {
        Self {
            recommendation_service: Arc::new(recommendation_service),
            config: Arc::new(config),
        }
    }

    /// Wire the Anthropic adapter from configuration
    ///
    /// Without a usable API key the service is left unconfigured and every
    /// recommendation request answers with a configuration error.
    pub fn from_config(config: AppConfig) -> Self {
        let service = if config.is_generation_configured() {
            match AnthropicGenerationAdapter::new(config.generation.clone()) {
                Ok(adapter) => {
                    info!(model = %config.generation.model, "Generation provider configured");
                    RecommendationService::new(Arc::new(adapter))
                },
                Err(e) => {
                    error!(error = %e, "Failed to initialize generation provider");
                    RecommendationService::unconfigured()
                },
            }
        } else {
            RecommendationService::unconfigured()
        };

        Self::new(service, config)
    }
}
