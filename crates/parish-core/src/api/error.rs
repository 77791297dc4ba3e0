use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// No response reached the client (offline, DNS, timeout, TLS...).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401. The stored session credential has already been purged.
    #[error("Unauthorized - session credential rejected")]
    Unauthorized { body: String, message: Option<String> },

    #[error("Request rejected ({status}): {body}")]
    Client { status: StatusCode, body: String, message: Option<String> },

    #[error("Server error ({status}): {body}")]
    Server { status: StatusCode, body: String, message: Option<String> },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String, message: Option<String> },

    #[error("Failed to (de)serialize body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// The `message` (or `error`) field of a JSON error body
    fn extract_message(body: &str) -> Option<String> {
        let payload: ErrorPayload = serde_json::from_str(body).ok()?;
        payload
            .message
            .or(payload.error)
            .filter(|m| !m.trim().is_empty())
    }

    /// Classify a non-2xx response. The backend message is read from the
    /// full body; only the stored raw text is truncated.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = Self::extract_message(body);
        let body = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized { body, message },
            400..=499 => ApiError::Client { status, body, message },
            500..=599 => ApiError::Server { status, body, message },
            _ => ApiError::UnexpectedStatus { status, body, message },
        }
    }

    /// HTTP status carried by the error, if a response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Client { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::UnexpectedStatus { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The backend-supplied `message` (or `error`) field of a JSON error body
    pub fn backend_message(&self) -> Option<String> {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::Client { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::UnexpectedStatus { message, .. } => message.clone(),
            ApiError::InvalidResponse(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Message to show a user: the backend's own message when there is one
    pub fn display_message(&self, fallback: &str) -> String {
        self.backend_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}
