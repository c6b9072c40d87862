//! Custom error types for MT API operations

use serde_json::Value;
use thiserror::Error;

/// Errors returned by the MT management client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Human readable message extracted from the body
        message: String,
        /// Parsed body, when it was JSON
        body: Option<Value>,
    },

    /// Failure reported by a transport not backed by reqwest
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport failure description
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// Decode failure description
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is wrong with the configuration
        message: String,
    },

    /// Reqwest error, kept whole so its source chain survives
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        ClientError::ConfigError {
            message: err.to_string(),
        }
    }
}

impl ClientError {
    /// Build an [`ClientError::ApiError`] from a raw response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();

        let message = parsed
            .as_ref()
            .and_then(extract_message)
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        ClientError::ApiError {
            status,
            message,
            body: parsed,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ApiError { status, .. } => Some(*status),
            ClientError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for a 404 response
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// Error bodies come in two shapes:
//   {"error": {"code": 404, "message": "..."}}
//   {"errors": [{"error": {"key": "name", "errors": [{"code": "...", "message": "..."}]}}]}
fn extract_message(body: &Value) -> Option<String> {
    if let Some(message) = body["error"]["message"].as_str() {
        return Some(message.to_string());
    }

    let messages: Vec<String> = body["errors"]
        .as_array()?
        .iter()
        .flat_map(|item| {
            let key = item["error"]["key"].as_str().unwrap_or_default().to_string();
            item["error"]["errors"]
                .as_array()
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter_map(move |e| {
                    let msg = e["message"].as_str()?;
                    Some(if key.is_empty() {
                        msg.to_string()
                    } else {
                        format!("{}: {}", key, msg)
                    })
                })
        })
        .collect();

    (!messages.is_empty()).then(|| messages.join("; "))
}

/// Result type for MT API operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_error_message() {
        let err = ClientError::from_response(
            404,
            r#"{"error":{"code":404,"message":"Machine Translation Not Found"}}"#,
        );

        match err {
            ClientError::ApiError {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Machine Translation Not Found");
                assert!(body.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_messages_are_joined() {
        let body = r#"{"errors":[
            {"error":{"key":"name","errors":[{"code":"isEmpty","message":"Value is required"}]}},
            {"error":{"key":"type","errors":[{"code":"notInArray","message":"Unknown engine"}]}}
        ]}"#;
        let err = ClientError::from_response(400, body);

        assert_eq!(
            err.to_string(),
            "API error: 400 - name: Value is required; type: Unknown engine"
        );
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let err = ClientError::from_response(502, "bad gateway from proxy");
        assert_eq!(err.to_string(), "API error: 502 - bad gateway from proxy");

        let err = ClientError::from_response(503, "");
        assert_eq!(err.to_string(), "API error: 503 - Service Unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_not_found() {
        assert!(ClientError::from_response(404, "").is_not_found());
        assert!(!ClientError::TimeoutError.is_not_found());
    }
}
