//! # Request Schema and Parameter Handling Tests
//!
//! Unsupported-field presence, streaming fan-out, and the boundary between
//! parse errors and validation errors.

use chatgate::{
    validate_request, ChatCompletionRequest, GateError, Message, UnsupportedField,
    ValidationError, UNSUPPORTED_FIELDS,
};
use serde_json::{json, Map, Value};

/// A value of the right wire type for each unsupported field.
fn sample_value(field: UnsupportedField) -> Value {
    match field {
        UnsupportedField::Model => json!("gpt-4"),
        UnsupportedField::LogitBias => json!({"50256": -100.0}),
        UnsupportedField::Logprobs => json!(false),
        UnsupportedField::ToolChoice => json!("auto"),
        UnsupportedField::Tools => json!([{
            "type": "function",
            "function": {"name": "lookup", "parameters": {"type": "object"}}
        }]),
        UnsupportedField::ResponseFormat => json!({"type": "json_object"}),
        UnsupportedField::Seed => json!(42),
        UnsupportedField::TopLogprobs => json!(2),
    }
}

fn base_body() -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(
        "messages".to_string(),
        json!([{"role": "user", "content": "Hello, world!"}]),
    );
    body
}

fn validate(body: Map<String, Value>) -> Result<(), ValidationError> {
    let request =
        ChatCompletionRequest::from_value(Value::Object(body)).expect("request should parse");
    validate_request(&request)
}

/// # Test Each Unsupported Field Alone
#[test]
fn test_each_unsupported_field_rejected() {
    for field in UNSUPPORTED_FIELDS {
        let mut body = base_body();
        body.insert(field.as_str().to_string(), sample_value(field));

        assert_eq!(
            validate(body),
            Err(ValidationError::UnsupportedField { fields: vec![field] }),
            "field {}",
            field
        );
    }
}

/// # Test Explicit Null Presence
///
/// Presence is key existence: `null` and `false` still count.
#[test]
fn test_explicit_null_unsupported_field_rejected() {
    for field in UNSUPPORTED_FIELDS {
        let mut body = base_body();
        body.insert(field.as_str().to_string(), Value::Null);

        let err = validate(body).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedField { fields: vec![field] });
    }
}

#[test]
fn test_all_unsupported_fields_listed_together() {
    let mut body = base_body();
    for field in UNSUPPORTED_FIELDS {
        body.insert(field.as_str().to_string(), sample_value(field));
    }

    let err = validate(body).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnsupportedField { fields: UNSUPPORTED_FIELDS.to_vec() }
    );
    let message = err.to_string();
    for field in UNSUPPORTED_FIELDS {
        assert!(message.contains(field.as_str()), "{} missing from '{}'", field, message);
    }
}

#[test]
fn test_unsupported_subset_listed_in_canonical_order() {
    let mut body = base_body();
    body.insert("top_logprobs".to_string(), json!(1));
    body.insert("logprobs".to_string(), json!(true));
    body.insert("model".to_string(), Value::Null);

    let err = validate(body).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnsupportedField {
            fields: vec![
                UnsupportedField::Model,
                UnsupportedField::Logprobs,
                UnsupportedField::TopLogprobs
            ]
        }
    );
}

/// # Test Unsupported Fields With Unusual Values
///
/// Whatever value an unsupported field carries, the request still parses
/// and every offending key is named.
#[test]
fn test_unsupported_fields_with_any_value_are_listed() {
    let mut body = base_body();
    body.insert("model".to_string(), json!("gpt-4"));
    body.insert("seed".to_string(), json!(-1));
    assert_eq!(
        validate(body),
        Err(ValidationError::UnsupportedField {
            fields: vec![UnsupportedField::Model, UnsupportedField::Seed]
        })
    );

    let mut body = base_body();
    body.insert(
        "response_format".to_string(),
        json!({"type": "json_schema", "json_schema": {"name": "answer", "schema": {}}}),
    );
    body.insert("tool_choice".to_string(), json!({"type": "allowed_tools"}));
    body.insert("logit_bias".to_string(), json!([1, 2]));
    assert_eq!(
        validate(body),
        Err(ValidationError::UnsupportedField {
            fields: vec![
                UnsupportedField::LogitBias,
                UnsupportedField::ToolChoice,
                UnsupportedField::ResponseFormat
            ]
        })
    );
}

/// # Test Streaming Fan-out
#[test]
fn test_stream_with_n_greater_than_one() {
    for n in [2u32, 3, 16, u32::MAX] {
        let mut body = base_body();
        body.insert("stream".to_string(), json!(true));
        body.insert("n".to_string(), json!(n));
        assert_eq!(validate(body), Err(ValidationError::InvalidStreamingFanout { n }));
    }
}

#[test]
fn test_stream_with_small_or_absent_n() {
    for n in [None, Some(0u32), Some(1)] {
        let mut body = base_body();
        body.insert("stream".to_string(), json!(true));
        if let Some(n) = n {
            body.insert("n".to_string(), json!(n));
        }
        assert_eq!(validate(body), Ok(()), "n = {:?}", n);
    }
}

#[test]
fn test_fanout_without_streaming() {
    let mut body = base_body();
    body.insert("n".to_string(), json!(4));
    body.insert("stream".to_string(), json!(false));
    assert_eq!(validate(body), Ok(()));
}

#[test]
fn test_null_stream_means_not_streaming() {
    let mut body = base_body();
    body.insert("stream".to_string(), Value::Null);
    body.insert("n".to_string(), json!(3));
    assert_eq!(validate(body), Ok(()));
}

/// # Test Parse Errors Stay Separate
#[test]
fn test_parse_errors_are_not_validation_errors() {
    let bodies = [
        r#"{"model": "x"}"#,
        r#"{"messages": "hi"}"#,
        r#"{"messages": [{"role": "user"}]}"#,
        r#"{"messages": [{"role": "tool", "content": "x"}]}"#,
        r#"{"messages": [], "n": -1}"#,
        "not json",
    ];
    for body in bodies {
        let err = ChatCompletionRequest::from_json(body).unwrap_err();
        assert!(matches!(err, GateError::Parse(_)), "body {}", body);
    }
}

#[test]
fn test_unknown_extra_fields_are_ignored() {
    let mut body = base_body();
    body.insert("user".to_string(), json!("someone"));
    body.insert("stream_options".to_string(), json!({"include_usage": true}));
    assert_eq!(validate(body), Ok(()));
}

#[test]
fn test_serialized_request_is_what_was_sent() {
    let body = json!({
        "messages": [
            {"role": "system", "content": "You are helpful."},
            {"role": "user", "content": "Hi"}
        ],
        "stream": true,
        "n": 1,
        "stop": "###",
        "temperature": 0.5
    });
    let request = ChatCompletionRequest::from_value(body.clone()).unwrap();
    assert!(request.validate().is_ok());
    assert_eq!(serde_json::to_value(&request).unwrap(), body);
}

#[test]
fn test_built_request_matches_parsed_request() {
    let built = ChatCompletionRequest::new(vec![Message::system("s"), Message::user("u")])
        .with_max_gen_len(32);
    let parsed = ChatCompletionRequest::from_value(json!({
        "messages": [{"role": "system", "content": "s"}, {"role": "user", "content": "u"}],
        "max_gen_len": 32
    }))
    .unwrap();
    assert_eq!(built, parsed);
}
