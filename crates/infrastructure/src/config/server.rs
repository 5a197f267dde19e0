//! HTTP server configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Drain window used when `shutdown_timeout_secs` is unset
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all in development)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Maximum body size for JSON requests in bytes (default: 1MB)
    #[serde(default = "default_max_body_json")]
    pub max_body_size_json_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3001
}

const fn default_max_body_json() -> usize {
    1024 * 1024 // 1MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: Some(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            max_body_size_json_bytes: default_max_body_json(),
        }
    }
}

impl ServerConfig {
    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// How long in-flight connections may drain after a shutdown signal
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(
            self.shutdown_timeout_secs
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3001");
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.shutdown_timeout_secs, Some(30));
        assert_eq!(config.max_body_size_json_bytes, 1_048_576);
    }

    #[test]
    fn deserialization_with_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn shutdown_timeout_follows_setting() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"shutdown_timeout_secs": 5}"#).unwrap();
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
    }
}
