//! Response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Uniform JSON envelope: `{success, data?, error?, message?}`.
///
/// `Deserialize` is derived so integration tests can decode responses
/// with the same type the handlers produce.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response carrying a payload and a human-readable note.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// Failed response carrying only an error string.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with no payload, only a note.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_omits_error_and_message() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert!(body.get("error").is_none());
        assert!(body.get("message").is_none());
    }

    #[test]
    fn error_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
        assert!(body.get("data").is_none());
    }
}
