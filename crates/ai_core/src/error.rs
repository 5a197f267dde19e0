//! Generation errors

use thiserror::Error;

/// Errors that can occur during generation
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key was configured
    #[error("API key is not configured")]
    MissingApiKey,

    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Request exceeded the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Provider-side failure
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            GenerationError::MissingApiKey.to_string(),
            "API key is not configured"
        );
        assert_eq!(GenerationError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            GenerationError::ServerError("Status 529: overloaded".to_string()).to_string(),
            "Server error: Status 529: overloaded"
        );
    }
}
