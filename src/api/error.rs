use serde_json::Value;
use thiserror::Error;

/// Fallback shown to users when the backend gave no message.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Attendance API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {detail}")]
    Status {
        status: u16,
        detail: String,
        /// The backend's own `error`/`message` text, if it sent one.
        server_message: Option<String>,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build a status error from a failed response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let server_message = server_message(body);
        let detail = server_message
            .clone()
            .unwrap_or_else(|| body.trim().chars().take(200).collect());
        ApiError::Status {
            status,
            detail,
            server_message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text for a toast: the server's message when present, else `fallback`.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                server_message: Some(msg),
                ..
            } => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_FAILURE)
    }
}

/// Pull `error`, then `message`, out of a JSON error body.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}
