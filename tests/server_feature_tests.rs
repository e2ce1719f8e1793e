//! # Server Feature Tests
//!
//! `GateError` as an axum response: status codes and the JSON error body.

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use chatgate::{ChatCompletionRequest, GateError, Message};
use serde_json::Value;

async fn into_parts(err: GateError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_validation_error_is_bad_request() {
    let request =
        ChatCompletionRequest::new(vec![Message::user("hi"), Message::assistant("hello")]);
    let err = GateError::from(request.validate().unwrap_err());

    let (status, body) = into_parts(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert_eq!(body["error"]["code"], "invalid_terminal_role");
}

#[tokio::test]
async fn test_parse_error_is_bad_request() {
    let err = ChatCompletionRequest::from_json("{").unwrap_err();
    let (status, body) = into_parts(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "parse_error");
}

#[tokio::test]
async fn test_engine_error_is_bad_gateway() {
    let (status, body) = into_parts(GateError::Engine("backend gone".to_string())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "api_error");
    assert_eq!(body["error"]["code"], Value::Null);
}

#[tokio::test]
async fn test_io_error_is_internal() {
    let err = GateError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
    let (status, _) = into_parts(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
