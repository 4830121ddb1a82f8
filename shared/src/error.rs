//! Error body returned by the product API
//!
//! ```json
//! { "status_code": 400, "error": "Bad Request", "message": "Field cannot be empty string" }
//! ```
//!
//! Only `message` is guaranteed; auth and not-found responses carry nothing else.

use serde::{Deserialize, Serialize};

/// Structured error body of a non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            error: None,
        }
    }

    /// Parse a response body; `None` when it is not a JSON object with a `message`.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_body() {
        let body = ApiErrorBody::parse(
            r#"{"status_code":400,"error":"Bad Request","message":"Field cannot be empty string"}"#,
        )
        .unwrap();
        assert_eq!(body.message, "Field cannot be empty string");
        assert_eq!(body.status_code, Some(400));
    }

    #[test]
    fn test_parse_message_only() {
        let body = ApiErrorBody::parse(r#"{"message":"Invalid or missing token"}"#).unwrap();
        assert_eq!(body.message, "Invalid or missing token");
        assert_eq!(body.error, None);
    }

    #[test]
    fn test_parse_rejects_other_bodies() {
        assert!(ApiErrorBody::parse("<html>502</html>").is_none());
        assert!(ApiErrorBody::parse(r#"{"detail":"nope"}"#).is_none());
        assert!(ApiErrorBody::parse("").is_none());
    }
}
