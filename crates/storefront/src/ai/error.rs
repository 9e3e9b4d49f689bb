//! Error types for generative model calls.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when calling the generative model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No API key configured.
    #[error("generative model is not configured")]
    NotConfigured,

    /// Client could not be built from configuration.
    #[error("invalid model configuration: {0}")]
    Config(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no call to the structured-output tool.
    #[error("model returned no {0} output")]
    MissingOutput(String),

    /// The call did not finish in time.
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
}

/// API error response body.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}
