//! AI Core - Generation engine for the Anthropic Messages API
//!
//! Sends a system instruction and a user prompt to a hosted model with the
//! provider-side web search tool enabled, and returns the typed reply.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod ports;

pub use anthropic::AnthropicGenerationEngine;
pub use config::{GenerationConfig, WebSearchToolConfig};
pub use error::GenerationError;
pub use ports::{ContentBlock, GenerationEngine, MessageRequest, MessageResponse, TokenUsage};
