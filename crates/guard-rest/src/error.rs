//! Error types for the REST path.

use guard_core::CoreError;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the REST middleware.
///
/// Nothing here is retried automatically. Parameter errors need a
/// corrected request, credential errors need new keys, and generic or
/// unexpected venue errors have an unknown cause.
#[derive(Debug, Error)]
pub enum RestError {
    /// Venue rejected a well-formed but invalid request.
    #[error("request rejected with parameter error: {0}")]
    Parameter(String),

    /// Key/secret pair does not authenticate.
    #[error("cannot authenticate with the given API key and secret")]
    InvalidCredentials,

    /// Venue-reported error with no more specific classification.
    #[error("request rejected with generic error: {0}")]
    Generic(String),

    /// Error-shaped payload carrying a code this layer does not know.
    /// The payload is kept verbatim so nothing is silently swallowed.
    #[error("request rejected with unexpected error: {0}")]
    UnexpectedResponse(Value),

    /// Enforcement rejected the request before anything was sent.
    #[error("rejected before send: {0}")]
    Rejected(#[from] CoreError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for REST operations.
pub type RestResult<T> = std::result::Result<T, RestError>;
