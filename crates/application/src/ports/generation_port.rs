//! Generation port - Interface for a text-generation provider
//!
//! The provider receives a system instruction plus a user prompt and may
//! invoke a web-search tool on its own before answering. Its reply is
//! passed through as a list of typed content segments.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ProviderError;

/// A single generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Fixed system instruction
    pub system: String,
    /// User prompt rendered from the query
    pub prompt: String,
}

impl GenerationRequest {
    /// Create a request from a system instruction and a prompt
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
        }
    }
}

/// One block of provider output
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSegment {
    /// Model-authored text
    Text(String),
    /// A tool invocation issued by the model
    ToolCall {
        id: String,
        name: String,
        input: Value,
    },
    /// Output of a tool the provider ran on the model's behalf
    ToolResult { tool_use_id: String, content: Value },
    /// A block type this client does not interpret
    Other,
}

impl ContentSegment {
    /// Text of a `Text` segment
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Raw provider reply, unmodified
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderMessage {
    /// Model that produced the reply
    pub model: String,
    /// Content blocks in provider order
    pub content: Vec<ContentSegment>,
    /// Why generation stopped, if reported
    pub stop_reason: Option<String>,
}

impl ProviderMessage {
    /// Create a message from its content blocks
    pub fn new(model: impl Into<String>, content: Vec<ContentSegment>) -> Self {
        Self {
            model: model.into(),
            content,
            stop_reason: None,
        }
    }

    /// Text segments in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(ContentSegment::as_text)
    }

    /// Number of tool invocations in the reply
    pub fn tool_call_count(&self) -> usize {
        self.content
            .iter()
            .filter(|segment| matches!(segment, ContentSegment::ToolCall { .. }))
            .count()
    }
}

/// Port for text generation
///
/// Implementations make a single attempt and never retry. Every failure is
/// reported as [`ProviderError`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate a reply for `request`
    async fn generate(&self, request: &GenerationRequest)
    -> Result<ProviderMessage, ProviderError>;
}
