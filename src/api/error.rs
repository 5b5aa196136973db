//! Rejections returned by the helpdesk API.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

/// A non-2xx answer from the API.
///
/// Keeps the server's JSON error body when there was one; the server reports
/// failures as `{"error": "<message>"}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: StatusCode,
    /// Parsed response body, if it was JSON
    pub body: Option<Value>,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Build an error from a response status and its raw body text.
    pub fn from_body(status: StatusCode, text: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self {
            status,
            body,
            message,
        }
    }

    /// The `error` field of the server's JSON body, if present.
    pub fn server_message(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == StatusCode::FORBIDDEN
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_server_error_field() {
        let err = ApiError::from_body(
            StatusCode::UNAUTHORIZED,
            r#"{"error": "Invalid credentials"}"#,
        );
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert_eq!(err.message, "Invalid credentials");
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials (401)");
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let err = ApiError::from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(err.body.is_none());
        assert!(err.server_message().is_none());
        assert_eq!(err.message, "HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_json_body_without_error_field() {
        let err = ApiError::from_body(StatusCode::NOT_FOUND, r#"{"detail": "nope"}"#);
        assert!(err.body.is_some());
        assert!(err.server_message().is_none());
        assert!(err.is_not_found());
    }
}
