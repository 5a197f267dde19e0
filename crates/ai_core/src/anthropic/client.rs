//! Anthropic Messages API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::ports::{GenerationEngine, MessageRequest, MessageResponse};

/// Output token limit sent with every request
pub const MAX_TOKENS: u32 = 2000;
/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// Generation engine backed by the Anthropic Messages API
pub struct AnthropicGenerationEngine {
    client: Client,
    config: GenerationConfig,
}

impl std::fmt::Debug for AnthropicGenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicGenerationEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnthropicGenerationEngine {
    /// Create a new engine
    ///
    /// The API key is installed as a default header, so the client can be
    /// shared across concurrent requests.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or(GenerationError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
            GenerationError::Authentication("API key is not a valid header value".to_string())
        })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&config.api_version)
                .map_err(|e| GenerationError::RequestFailed(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| GenerationError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            web_search = config.web_search.enabled,
            "Initialized Anthropic generation engine"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        if self.config.web_search.enabled {
            vec![ToolDefinition {
                kind: WEB_SEARCH_TOOL_TYPE.to_string(),
                name: WEB_SEARCH_TOOL_NAME.to_string(),
                max_uses: Some(self.config.web_search.max_uses),
            }]
        } else {
            Vec::new()
        }
    }
}

/// Messages API request body
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDefinition>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolDefinition {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_uses: Option<u32>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

fn error_for_status(status: StatusCode, body: &str) -> GenerationError {
    let detail = serde_json::from_str::<ApiErrorBody>(body).map_or_else(
        |_| body.to_string(),
        |parsed| format!("{}: {}", parsed.error.kind, parsed.error.message),
    );

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GenerationError::Timeout,
        s if s.is_server_error() => {
            GenerationError::ServerError(format!("Status {s}: {detail}"))
        },
        s => GenerationError::RequestFailed(format!("Status {s}: {detail}")),
    }
}

#[async_trait]
impl GenerationEngine for AnthropicGenerationEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: MessageRequest) -> Result<MessageResponse, GenerationError> {
        let body = ApiRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: request.system.as_deref(),
            messages: vec![ApiMessage {
                role: "user",
                content: &request.prompt,
            }],
            tools: self.tools(),
        };

        debug!(tools = body.tools.len(), "Sending request to Messages API");

        let response = self
            .client
            .post(self.api_url("messages"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Generation request failed");
            return Err(error_for_status(status, &body));
        }

        let reply: MessageResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        debug!(
            blocks = reply.content.len(),
            stop_reason = ?reply.stop_reason,
            usage = ?reply.usage,
            "Generation completed"
        );

        Ok(reply)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
