//! Anthropic Messages API engine implementation
//!
//! Uses the `web_search` server tool, which the provider executes on its own
//! side before producing the final text.

mod client;

pub use client::AnthropicGenerationEngine;
