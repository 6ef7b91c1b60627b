use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a single call against the LiveTV! API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Session is missing or expired. The client has already been sent to `/login`.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any non-200 status other than 401. `body` is the raw server text.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the global message toast. The backend puts its
    /// human-readable reason in the body of failed responses.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } if !body.trim().is_empty() => body.trim().to_string(),
            ApiError::Timeout => "Request timed out".to_string(),
            _ => "Unknown error".to_string(),
        }
    }
}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_body() {
        let err = ApiError::Status { status: 400, body: "  channel exists \n".to_string() };
        assert_eq!(err.user_message(), "channel exists");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status { status: 500, body: String::new() };
        assert_eq!(err.user_message(), "Unknown error");
        assert_eq!(ApiError::Network("reset".into()).user_message(), "Unknown error");
        assert_eq!(ApiError::Timeout.user_message(), "Request timed out");
    }
}
