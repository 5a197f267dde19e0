//! Port definitions for generation engines
//!
//! Defines the traits (ports) that generation adapters must implement, and
//! the typed reply shape of the Messages API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerationError;

/// Request for a single-turn generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    /// System instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// User prompt
    pub prompt: String,
}

impl MessageRequest {
    /// Create a request with a system instruction
    pub fn with_system(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            prompt: prompt.into(),
        }
    }
}

/// One content block of a reply
///
/// Block types this client does not model decode to [`ContentBlock::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Model-authored text
    Text { text: String },
    /// Client tool invocation
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    /// Server tool invocation run by the provider
    ServerToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    /// Results of a provider-run web search
    WebSearchToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Value,
    },
    /// Result of a client tool
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Value,
    },
    #[serde(other)]
    Unknown,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Reply from the Messages API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Provider message id
    #[serde(default)]
    pub id: String,
    /// Model that generated the reply
    #[serde(default)]
    pub model: String,
    /// Content blocks in provider order
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Why generation stopped
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl MessageResponse {
    /// Concatenated text of all text blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Port for generation engine implementations
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Generate a complete reply; never retries
    async fn generate(&self, request: MessageRequest) -> Result<MessageResponse, GenerationError>;

    /// Model identifier used for requests
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_mixed_content_blocks() {
        let response: MessageResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "text", "text": "Let me search."},
                {"type": "server_tool_use", "id": "srvtoolu_1", "name": "web_search",
                 "input": {"query": "family activities austin"}},
                {"type": "web_search_tool_result", "tool_use_id": "srvtoolu_1",
                 "content": [{"type": "web_search_result", "url": "https://example.com"}]},
                {"type": "text", "text": "{\"recommendations\": []}",
                 "citations": [{"type": "web_search_result_location"}]},
                {"type": "thinking", "thinking": "hmm"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 120, "output_tokens": 80}
        }))
        .unwrap();

        assert_eq!(response.content.len(), 5);
        assert!(matches!(response.content[1], ContentBlock::ServerToolUse { ref name, .. } if name == "web_search"));
        assert!(matches!(response.content[2], ContentBlock::WebSearchToolResult { .. }));
        assert_eq!(response.content[4], ContentBlock::Unknown);
        assert_eq!(response.text(), "Let me search.{\"recommendations\": []}");
        assert_eq!(response.usage.map(|u| u.output_tokens), Some(80));
    }

    #[test]
    fn request_constructor() {
        let with_system = MessageRequest::with_system("be brief", "hi");
        assert_eq!(with_system.system.as_deref(), Some("be brief"));
        assert_eq!(with_system.prompt, "hi");
    }
}
