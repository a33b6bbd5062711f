// Error types for gemini-relay
// Author: kelexine (https://github.com/kelexine)

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Failed to read image: {0}")]
    MissingImage(String),

    #[error("Failed to process image: {0}")]
    ImageRead(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("API key is not configured")]
    MissingCredential,

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Content blocked by Gemini: {0}")]
    ContentBlocked(String),

    #[error("Failed to serialize response: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingImage(_) => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body returned to the caller.
    ///
    /// Upstream and internal details stay in the logs; callers only get a
    /// short, stable message.
    pub fn public_message(&self) -> String {
        match self {
            RelayError::MethodNotAllowed
            | RelayError::MissingImage(_)
            | RelayError::MissingCredential => self.to_string(),
            RelayError::ImageRead(_) => "Failed to process image".to_string(),
            RelayError::PayloadTooLarge(_) => "Request body too large".to_string(),
            RelayError::GeminiApi(_) | RelayError::ContentBlocked(_) => {
                "Failed to generate content".to_string()
            }
            RelayError::Serialization(_) => "Failed to serialize response".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

// Convert RelayError to plain-text HTTP responses for Axum
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", self);
        }

        let body = self.public_message();

        if let RelayError::MethodNotAllowed = self {
            return (status, [(header::ALLOW, "POST, OPTIONS")], body).into_response();
        }

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
