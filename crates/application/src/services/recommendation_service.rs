//! Recommendation service - The request pipeline
//!
//! Validates the raw payload, renders the prompt, calls the generation
//! provider once under a timeout and parses the reply. Provider failures and
//! timeouts are recovered into a canned, degraded result; only missing
//! configuration and invalid input are reported to the caller.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use domain::{ActivityQuery, ActivityRecommendation, RecommendationResult};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::{ApplicationError, ProviderError},
    ports::{GenerationPort, ProviderMessage},
    services::{PromptBuilder, ResponseParser},
};

/// Upper bound on a single provider call
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationService {
    generation: Option<Arc<dyn GenerationPort>>,
    timeout: Duration,
}

impl fmt::Debug for RecommendationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommendationService")
            .field("configured", &self.is_configured())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RecommendationService {
    /// Create a service backed by a generation provider
    pub fn new(generation: Arc<dyn GenerationPort>) -> Self {
        Self {
            generation: Some(generation),
            timeout: GENERATION_TIMEOUT,
        }
    }

    /// Create a service with no provider configured
    ///
    /// Every call to [`recommend`](Self::recommend) or
    /// [`recommend_for_query`](Self::recommend_for_query) fails with
    /// [`ApplicationError::Configuration`].
    pub fn unconfigured() -> Self {
        Self {
            generation: None,
            timeout: GENERATION_TIMEOUT,
        }
    }

    /// Override the provider timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a generation provider is available
    pub const fn is_configured(&self) -> bool {
        self.generation.is_some()
    }

    /// Run the full pipeline on an untyped payload
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Configuration`] when no provider is configured
    /// - [`ApplicationError::Validation`] with every field error when the
    ///   payload is invalid
    #[instrument(skip(self, input))]
    pub async fn recommend(&self, input: &Value) -> Result<RecommendationResult, ApplicationError> {
        self.provider()?;

        let query = ActivityQuery::from_untyped(input).map_err(|errors| {
            debug!(error_count = errors.len(), "Rejected recommendation request");
            ApplicationError::Validation(errors)
        })?;

        self.recommend_for_query(&query).await
    }

    /// Run generation and parsing for an already validated query
    ///
    /// Provider errors and timeouts produce the canned degraded result.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] when no provider is
    /// configured.
    #[instrument(
        skip(self, query),
        fields(
            city = %query.city(),
            age_count = query.child_ages().len(),
            has_preferences = query.preferences().is_some()
        )
    )]
    pub async fn recommend_for_query(
        &self,
        query: &ActivityQuery,
    ) -> Result<RecommendationResult, ApplicationError> {
        let generation = self.provider()?;
        let start = Instant::now();
        info!("Processing recommendation request");

        let result = match self.generate(generation.as_ref(), query).await {
            Ok(message) => {
                debug!(
                    model = %message.model,
                    tool_calls = message.tool_call_count(),
                    "Provider reply received"
                );
                let parsed = ResponseParser::parse(&message);
                RecommendationResult::new(query, parsed.recommendations, parsed.degraded)
            },
            Err(e) => {
                warn!(error = %e, "Generation failed, returning fallback recommendations");
                RecommendationResult::new(query, Self::fallback_recommendations(), true)
            },
        };

        info!(
            recommendation_count = result.len(),
            degraded = result.is_degraded(),
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Recommendations generated"
        );
        Ok(result)
    }

    fn provider(&self) -> Result<&Arc<dyn GenerationPort>, ApplicationError> {
        self.generation.as_ref().ok_or_else(|| {
            error!("Generation provider API key is not configured");
            ApplicationError::Configuration(
                "Generation provider API key is not configured".to_string(),
            )
        })
    }

    async fn generate(
        &self,
        generation: &dyn GenerationPort,
        query: &ActivityQuery,
    ) -> Result<ProviderMessage, ProviderError> {
        let request = PromptBuilder::request(query);
        match tokio::time::timeout(self.timeout, generation.generate(&request)).await {
            Ok(reply) => reply,
            Err(_) => Err(ProviderError::new(format!(
                "generation timed out after {}s",
                self.timeout.as_secs_f32()
            ))),
        }
    }

    /// Canned recommendations returned when the provider cannot be reached
    pub fn fallback_recommendations() -> Vec<ActivityRecommendation> {
        vec![
            ActivityRecommendation::new(
                "**Local Family Fun**",
                "🎪",
                "We're having trouble connecting to our activity database right now. \
                 Please try again in a few moments, or check your local community center \
                 and parks for family activities.",
                "https://example.com",
                "Various",
                "All ages",
                "Check local listings",
            ),
            ActivityRecommendation::new(
                "**Community Events**",
                "🏘️",
                "Visit your local library, community center, or city website for current \
                 family events and activities happening in your area.",
                "https://example.com",
                "Local",
                "All ages",
                "Various times",
            ),
        ]
    }
}
