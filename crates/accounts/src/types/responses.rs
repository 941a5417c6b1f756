//! Response envelope handed to transport layers.

use serde::{Deserialize, Serialize};

use super::errors::AccountError;

/// Generic response carrying a message, an optional result, and an optional error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    /// Successful response wrapping `result`.
    pub fn ok<T: Serialize>(message: impl Into<String>, result: &T) -> Self {
        let message = message.into();
        match serde_json::to_value(result) {
            Ok(value) => Self {
                message,
                result: Some(value),
                error: None,
            },
            Err(error) => Self {
                message,
                result: None,
                error: Some(format!("failed to encode result: {error}")),
            },
        }
    }

    /// Failed response; the message is prefixed with the error's transport label.
    pub fn from_error(message: impl Into<String>, error: &AccountError) -> Self {
        Self {
            message: format!("{}: {}", error.kind().label(), message.into()),
            result: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response_omits_error_field() {
        let response = MessageResponse::ok("user created", &json!({ "id": 1 }));
        let encoded = serde_json::to_value(&response).unwrap();

        assert_eq!(encoded, json!({ "message": "user created", "result": { "id": 1 } }));
        assert!(!response.is_error());
    }

    #[test]
    fn test_error_response_carries_label_and_detail() {
        let response = MessageResponse::from_error("login failed", &AccountError::Unauthorized);

        assert_eq!(response.message, "invalid credentials: login failed");
        assert_eq!(response.error.as_deref(), Some("invalid credentials"));
        assert!(response.result.is_none());
    }
}
