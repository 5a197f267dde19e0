//! API error handling
//!
//! Maps application failures onto the response bodies the web client reads.
//! Validation and configuration failures use a flat `{error, ...}` body;
//! routing and internal failures use the nested `{error: {message, code,
//! timestamp, path}}` envelope.

use application::ApplicationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use domain::FieldError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed field validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Body was not valid JSON
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body exceeded the configured size limit
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Server lacks required configuration
    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Endpoint not found: {path}")]
    NotFound { path: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Flat body for validation failures
#[derive(Debug, Serialize)]
pub struct ValidationErrorBody {
    pub error: String,
    pub details: Vec<FieldError>,
}

/// Flat body for configuration failures
#[derive(Debug, Serialize)]
pub struct ConfigurationErrorBody {
    pub error: String,
    pub message: String,
}

/// Nested error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Contents of [`ErrorResponse`]
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, code: &str, path: Option<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code: code.to_string(),
                timestamp: Utc::now(),
                path,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(details) => {
                debug!(count = details.len(), "Rejected invalid request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody {
                        error: "Validation failed".to_string(),
                        details,
                    }),
                )
                    .into_response()
            },
            Self::BadRequest(message) => {
                debug!(%message, "Rejected malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody {
                        error: "Validation failed".to_string(),
                        details: vec![FieldError::new("body", message)],
                    }),
                )
                    .into_response()
            },
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse::new(
                    "Request body too large",
                    "PAYLOAD_TOO_LARGE",
                    None,
                )),
            )
                .into_response(),
            Self::Configuration(message) => {
                error!(%message, "Request failed on server configuration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ConfigurationErrorBody {
                        error: "Server configuration error".to_string(),
                        message,
                    }),
                )
                    .into_response()
            },
            Self::NotFound { path } => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "Endpoint not found",
                    "NOT_FOUND",
                    Some(path),
                )),
            )
                .into_response(),
            Self::Internal(message) => {
                // Details stay in the log
                error!(%message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "Internal server error",
                        "INTERNAL_ERROR",
                        None,
                    )),
                )
                    .into_response()
            },
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(details) => Self::Validation(details),
            ApplicationError::Configuration(message) => Self::Configuration(message),
            ApplicationError::Parse(message) => Self::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}
