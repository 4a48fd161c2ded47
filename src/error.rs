// ============================================================================
// ERRORS - Flat client error taxonomy
// ============================================================================

use serde_json::Value;

/// Every failure a screen can observe. None of them is fatal: each one ends
/// up as a visible message and an unchanged UI state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Transport failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from the backend; logout has already run
    #[error("Your session has expired, please log in again")]
    Unauthorized,

    /// Non-2xx answer carrying a domain message (duplicate, not found...)
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The local token store refused a write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Builds a backend error from a response body, preferring the FastAPI
    /// `detail` string, then a `message` field, then a generic fallback.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(Value::as_str)
                    .or_else(|| value.get("message").and_then(Value::as_str))
                    .map(str::to_string)
            })
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ApiError::Backend { status, message }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Parse(_) => "Unexpected response from the server.".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the screen should offer a manual retry control
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_surfaced_verbatim() {
        let err = ApiError::from_response(404, r#"{"detail":"Patient not found"}"#);
        assert_eq!(err.user_message(), "Patient not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn message_field_is_used_when_detail_is_absent() {
        let err = ApiError::from_response(409, r#"{"message":"Duplicate appointment"}"#);
        assert_eq!(err.to_string(), "Duplicate appointment");
    }

    #[test]
    fn non_json_body_falls_back_to_generic_message() {
        let err = ApiError::from_response(500, "<html>Internal Server Error</html>");
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn structured_detail_falls_back_to_generic_message() {
        // FastAPI validation errors carry a list in `detail`
        let err = ApiError::from_response(422, r#"{"detail":[{"loc":["body"],"msg":"x"}]}"#);
        assert_eq!(err.to_string(), "Request failed with status 422");
    }

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(ApiError::Network("timeout".into()).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Validation("x".into()).is_retryable());
    }
}
