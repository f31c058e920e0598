use serde::Deserialize;
use thiserror::Error;

use crate::shapes::UnrecognizedResponseShape;

/// Fallback shown when no better message can be extracted.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Structured error payload the backend attaches to non-2xx responses.
///
/// All fields are optional; a body that parses to none of them still
/// deserializes (to the default), so callers always get a best-effort view.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub details: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best-effort parse; anything unparseable yields the empty body.
    pub fn from_text(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}

/// Failures surfaced by the gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status})")]
    Status { status: u16, body: ErrorBody },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Shape(#[from] UnrecognizedResponseShape),
}

/// Normalize any gateway error into a user-displayable string.
///
/// Precedence is load-bearing: server-provided structured detail always wins
/// over generic transport text.
/// 1. first element of the body's `details` array,
/// 2. the body's `message` field,
/// 3. the body's `error` field,
/// 4. the transport error's own message,
/// 5. the error value's display,
/// 6. the fixed fallback.
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { body, .. } => {
            if let Some(detail) = body.details.as_ref().and_then(|d| d.first()) {
                return detail.clone();
            }
            if let Some(message) = body.message.as_deref().filter(|m| !m.is_empty()) {
                return message.to_string();
            }
            if let Some(error) = body.error.as_deref().filter(|e| !e.is_empty()) {
                return error.to_string();
            }
            UNEXPECTED_ERROR.to_string()
        }
        ApiError::Network(msg) | ApiError::Parse(msg) if !msg.is_empty() => msg.clone(),
        ApiError::Shape(err) => err.to_string(),
        _ => UNEXPECTED_ERROR.to_string(),
    }
}
