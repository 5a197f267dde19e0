//! Anthropic generation adapter - Implements GenerationPort using ai_core

use std::time::Instant;

use ai_core::{
    AnthropicGenerationEngine, ContentBlock, GenerationConfig, GenerationEngine, GenerationError,
    MessageRequest, MessageResponse,
};
use application::{
    error::ProviderError,
    ports::{ContentSegment, GenerationPort, GenerationRequest, ProviderMessage},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for the Anthropic Messages API
#[derive(Debug)]
pub struct AnthropicGenerationAdapter {
    engine: AnthropicGenerationEngine,
}

impl AnthropicGenerationAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: GenerationConfig) -> Result<Self, ProviderError> {
        let engine = AnthropicGenerationEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }

    /// Convert ai_core error to the single provider error kind
    fn map_error(e: GenerationError) -> ProviderError {
        ProviderError::new(e.to_string())
    }
}

/// Convert a typed Messages API reply into content segments
pub fn to_provider_message(response: MessageResponse) -> ProviderMessage {
    let content = response
        .content
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { text } => ContentSegment::Text(text),
            ContentBlock::ToolUse { id, name, input }
            | ContentBlock::ServerToolUse { id, name, input } => {
                ContentSegment::ToolCall { id, name, input }
            },
            ContentBlock::ToolResult {
                tool_use_id,
                content,
            }
            | ContentBlock::WebSearchToolResult {
                tool_use_id,
                content,
            } => ContentSegment::ToolResult {
                tool_use_id,
                content,
            },
            ContentBlock::Unknown => ContentSegment::Other,
        })
        .collect();

    ProviderMessage {
        model: response.model,
        content,
        stop_reason: response.stop_reason,
    }
}

#[async_trait]
impl GenerationPort for AnthropicGenerationAdapter {
    #[instrument(skip(self, request), fields(model = %self.engine.model_name(), prompt_len = request.prompt.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderMessage, ProviderError> {
        let start = Instant::now();

        let response = self
            .engine
            .generate(MessageRequest::with_system(
                request.system.clone(),
                request.prompt.clone(),
            ))
            .await
            .map_err(|e| {
                warn!(error = %e, "Generation provider call failed");
                Self::map_error(e)
            })?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            latency_ms,
            blocks = response.content.len(),
            "Generation provider call completed"
        );

        Ok(to_provider_message(response))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_without_api_key_is_provider_error() {
        let err = AnthropicGenerationAdapter::new(GenerationConfig::default()).unwrap_err();
        assert!(err.message().contains("API key"));
    }

    #[test]
    fn converts_every_block_kind() {
        let response: MessageResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "text", "text": "Searching."},
                {"type": "server_tool_use", "id": "srv_1", "name": "web_search", "input": {"query": "zoo"}},
                {"type": "web_search_tool_result", "tool_use_id": "srv_1", "content": []},
                {"type": "tool_use", "id": "tu_1", "name": "lookup", "input": {}},
                {"type": "tool_result", "tool_use_id": "tu_1", "content": "ok"},
                {"type": "redacted_thinking", "data": "xyz"},
                {"type": "text", "text": "Done."}
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap();

        let message = to_provider_message(response);

        assert_eq!(message.model, "claude-3-5-sonnet-20241022");
        assert_eq!(message.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(message.content.len(), 7);
        assert_eq!(message.tool_call_count(), 2);
        assert!(matches!(
            message.content[2],
            ContentSegment::ToolResult { ref tool_use_id, .. } if tool_use_id == "srv_1"
        ));
        assert_eq!(message.content[5], ContentSegment::Other);
        assert_eq!(message.texts().collect::<Vec<_>>(), vec!["Searching.", "Done."]);
    }
}
