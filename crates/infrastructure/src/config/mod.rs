//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `logging`: Log filter and output format
//!
//! Generation settings reuse [`ai_core::GenerationConfig`].

mod logging;
mod server;

use std::{collections::HashMap, fmt};

use ai_core::GenerationConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for environment overrides, e.g. `ACTIVITY_FINDER_SERVER__PORT`
pub const ENV_PREFIX: &str = "ACTIVITY_FINDER";

/// Conventional variable holding the provider API key
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Application environment (development or production)
///
/// Controls CORS strictness and startup warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - permissive CORS
    #[default]
    Development,
    /// Production environment - configured origins only
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation provider configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Sources in increasing precedence: built-in defaults, `config.toml`
    /// in the working directory, `ACTIVITY_FINDER_*` variables. The API key
    /// falls back to `ANTHROPIC_API_KEY` when no other source set it.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config = Self::build(Some("config"), None)?;
        config.apply_api_key_fallback(std::env::var(API_KEY_ENV_VAR).ok());
        Ok(config)
    }

    /// Build configuration from an optional file and environment
    ///
    /// `env` replaces the process environment when given.
    pub fn build(
        file: Option<&str>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?;

        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        // Override with environment variables (e.g., ACTIVITY_FINDER_SERVER__PORT)
        let builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins")
                .try_parsing(true)
                .source(env),
        );

        builder.build()?.try_deserialize()
    }

    /// Fill the API key from `fallback` when no source provided one
    pub fn apply_api_key_fallback(&mut self, fallback: Option<String>) {
        if self.generation.api_key.is_some() {
            return;
        }
        if let Some(key) = fallback.filter(|k| !k.trim().is_empty()) {
            debug!("Using {} for the generation API key", API_KEY_ENV_VAR);
            self.generation.api_key = Some(SecretString::from(key));
        }
    }

    /// Effective environment, defaulting to development
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Whether the generation provider can be used
    pub fn is_generation_configured(&self) -> bool {
        self.generation.has_api_key()
    }

    /// Log configuration problems that do not prevent startup
    pub fn log_warnings(&self) {
        if !self.is_generation_configured() {
            warn!(
                "No generation API key configured (set {} or {}_GENERATION__API_KEY); \
                 recommendation requests will fail with a configuration error",
                API_KEY_ENV_VAR,
                ENV_PREFIX
            );
        }
        if self.environment() == Environment::Production && self.server.allowed_origins.is_empty()
        {
            warn!("No CORS origins configured in production; all cross-origin requests will be rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(AppConfig::default().environment(), Environment::Development);
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Development), "development");
        assert_eq!(format!("{}", Environment::Production), "production");
    }

    #[test]
    fn environment_from_str() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "DEVELOPMENT".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn build_without_sources_uses_defaults() {
        let config = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.generation.timeout_ms, 30000);
        assert_eq!(config.generation.model, "claude-3-5-sonnet-20241022");
        assert!(!config.is_generation_configured());
    }

    #[test]
    fn build_reads_prefixed_environment() {
        let config = AppConfig::build(
            None,
            env(&[
                ("ACTIVITY_FINDER_SERVER__PORT", "8080"),
                ("ACTIVITY_FINDER_ENVIRONMENT", "production"),
                ("ACTIVITY_FINDER_GENERATION__API_KEY", "sk-env"),
                ("ACTIVITY_FINDER_GENERATION__WEB_SEARCH__MAX_USES", "3"),
                ("ACTIVITY_FINDER_LOGGING__FORMAT", "json"),
                ("UNRELATED_PORT", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.generation.web_search.max_uses, 3);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.generation.api_key.as_ref().map(|k| k.expose_secret()),
            Some("sk-env")
        );
    }

    #[test]
    fn build_parses_origin_list() {
        let config = AppConfig::build(
            None,
            env(&[(
                "ACTIVITY_FINDER_SERVER__ALLOWED_ORIGINS",
                "https://a.example,https://b.example",
            )]),
        )
        .unwrap();
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn api_key_fallback_fills_missing_key() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("sk-fallback".to_string()));
        assert!(config.is_generation_configured());
    }

    #[test]
    fn api_key_fallback_ignores_blank_values() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("  ".to_string()));
        assert!(!config.is_generation_configured());
        config.apply_api_key_fallback(None);
        assert!(!config.is_generation_configured());
    }

    #[test]
    fn api_key_fallback_does_not_override() {
        let mut config = AppConfig::default();
        config.generation = GenerationConfig::with_api_key("sk-configured");
        config.apply_api_key_fallback(Some("sk-fallback".to_string()));
        assert_eq!(
            config.generation.api_key.as_ref().map(|k| k.expose_secret()),
            Some("sk-configured")
        );
    }

    #[test]
    fn serialization_omits_api_key() {
        let mut config = AppConfig::default();
        config.apply_api_key_fallback(Some("sk-secret".to_string()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
