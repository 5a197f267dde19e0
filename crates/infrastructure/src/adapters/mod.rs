//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod anthropic_generation_adapter;

pub use anthropic_generation_adapter::{AnthropicGenerationAdapter, to_provider_message};
