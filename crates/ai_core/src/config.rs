//! Configuration for the generation engine

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for the Anthropic generation engine
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the Messages API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Value of the `anthropic-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Provider-side web search tool
    #[serde(default)]
    pub web_search: WebSearchToolConfig,
}

/// Web search server tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchToolConfig {
    /// Whether the tool is declared on requests
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum searches the model may run per request
    #[serde(default = "default_max_uses")]
    pub max_uses: u32,
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_true() -> bool {
    true
}

const fn default_max_uses() -> u32 {
    5
}

impl Default for WebSearchToolConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_uses: default_max_uses(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            api_version: default_api_version(),
            timeout_ms: default_timeout_ms(),
            web_search: WebSearchToolConfig::default(),
        }
    }
}

impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .field("timeout_ms", &self.timeout_ms)
            .field("web_search", &self.web_search)
            .finish()
    }
}

impl GenerationConfig {
    /// Default configuration with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
