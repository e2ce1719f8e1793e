#[cfg(feature = "server")]
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The request parsed but is outside the supported subset
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The request body does not match the schema at all
    #[error("Malformed request: {0}")]
    Parse(String),

    /// The engine failed after accepting a request
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for GateError {
    /// JSON syntax and schema mismatches are both parse failures; they are
    /// kept apart from validation so callers can tell "unreadable" from
    /// "unsupported".
    fn from(err: serde_json::Error) -> Self {
        GateError::Parse(err.to_string())
    }
}

impl GateError {
    /// Provider-style `type` string for the error body.
    pub fn error_type(&self) -> &'static str {
        match self {
            GateError::Validation(_) | GateError::Parse(_) => "invalid_request_error",
            GateError::Engine(_) => "api_error",
            GateError::Io(_) => "internal_error",
        }
    }

    /// Body in the `{"error": {"message", "type", "code"}}` shape clients expect.
    pub fn to_error_response(&self) -> ErrorResponse {
        let (message, code) = match self {
            GateError::Validation(err) => (err.to_string(), Some(err.code().to_string())),
            GateError::Parse(msg) => (msg.clone(), Some("parse_error".to_string())),
            other => (other.to_string(), None),
        };

        ErrorResponse {
            error: ErrorDetails {
                message,
                r#type: self.error_type().to_string(),
                code,
            },
        }
    }
}

/// # Error Response
///
/// Error envelope returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    pub r#type: String,
    pub code: Option<String>,
}

#[cfg(feature = "server")]
impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = match &self {
            GateError::Validation(_) | GateError::Parse(_) => StatusCode::BAD_REQUEST,
            GateError::Engine(_) => StatusCode::BAD_GATEWAY,
            GateError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self.to_error_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Role;
    use serde_json::json;

    #[test]
    fn test_validation_error_body() {
        let err = GateError::from(ValidationError::InvalidTerminalRole {
            role: Some(Role::Assistant),
        });
        let body = serde_json::to_value(err.to_error_response()).unwrap();

        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], "invalid_terminal_role");
        assert_eq!(
            body["error"]["message"],
            "Last message should be from `user`, but found `assistant`"
        );
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err =
            serde_json::from_value::<crate::schemas::Message>(json!({"role": 7})).unwrap_err();
        let err = GateError::from(serde_err);
        assert!(matches!(err, GateError::Parse(_)));
        assert_eq!(err.to_error_response().error.code.as_deref(), Some("parse_error"));
    }

    #[test]
    fn test_engine_error_body_has_no_code() {
        let err = GateError::Engine("model not loaded".to_string());
        let response = err.to_error_response();
        assert_eq!(response.error.r#type, "api_error");
        assert_eq!(response.error.message, "Engine error: model not loaded");
        assert!(response.error.code.is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: GateError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.error_type(), "internal_error");
    }
}
