//! # Request Validation
//!
//! The gate every request passes before it reaches an engine. Validation is
//! a pure check over `&ChatCompletionRequest`: it never mutates or defaults a
//! field, so what the engine receives is exactly what the caller sent.
//!
//! Checks run in a fixed order and stop at the first failing category:
//!
//! 1. unsupported fields (all offenders are collected into one error)
//! 2. per-message shape
//! 3. the last message is a user turn
//! 4. no `n > 1` while streaming

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::schemas::{ChatCompletionRequest, Message, Role, UserContent};

/// Bumped whenever [`UNSUPPORTED_FIELDS`] changes.
pub const UNSUPPORTED_FIELDS_VERSION: u32 = 1;

/// Request fields that are part of the wire schema but that the engine
/// cannot execute. Presence of any of them rejects the request.
pub const UNSUPPORTED_FIELDS: [UnsupportedField; 8] = [
    UnsupportedField::Model,
    UnsupportedField::LogitBias,
    UnsupportedField::Logprobs,
    UnsupportedField::ToolChoice,
    UnsupportedField::Tools,
    UnsupportedField::ResponseFormat,
    UnsupportedField::Seed,
    UnsupportedField::TopLogprobs,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedField {
    Model,
    LogitBias,
    Logprobs,
    ToolChoice,
    Tools,
    ResponseFormat,
    Seed,
    TopLogprobs,
}

impl UnsupportedField {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnsupportedField::Model => "model",
            UnsupportedField::LogitBias => "logit_bias",
            UnsupportedField::Logprobs => "logprobs",
            UnsupportedField::ToolChoice => "tool_choice",
            UnsupportedField::Tools => "tools",
            UnsupportedField::ResponseFormat => "response_format",
            UnsupportedField::Seed => "seed",
            UnsupportedField::TopLogprobs => "top_logprobs",
        }
    }

    /// Key presence, not truthiness: an explicit `null` counts.
    pub fn is_present_in(&self, request: &ChatCompletionRequest) -> bool {
        match self {
            UnsupportedField::Model => request.model.is_some(),
            UnsupportedField::LogitBias => request.logit_bias.is_some(),
            UnsupportedField::Logprobs => request.logprobs.is_some(),
            UnsupportedField::ToolChoice => request.tool_choice.is_some(),
            UnsupportedField::Tools => request.tools.is_some(),
            UnsupportedField::ResponseFormat => request.response_format.is_some(),
            UnsupportedField::Seed => request.seed.is_some(),
            UnsupportedField::TopLogprobs => request.top_logprobs.is_some(),
        }
    }
}

impl fmt::Display for UnsupportedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("The following fields in ChatCompletionRequest are not yet supported: {}", join_fields(.fields))]
    UnsupportedField { fields: Vec<UnsupportedField> },

    #[error("User message {index} content must be a string, multi-part content is not supported: {content}")]
    UnsupportedContent { index: usize, content: String },

    #[error("Assistant message {index} has `tool_calls`; tool calling is not supported")]
    UnsupportedToolCall { index: usize },

    #[error("{}", describe_role_violation(.index, .role))]
    UnsupportedRole { index: usize, role: Role },

    #[error("Last message should be from `user`, but found {}", describe_terminal(.role))]
    InvalidTerminalRole { role: Option<Role> },

    #[error("When streaming, `n` cannot be > 1, got n = {n}")]
    InvalidStreamingFanout { n: u32 },
}

impl ValidationError {
    /// Stable machine-readable tag for this kind of rejection.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedField { .. } => "unsupported_field",
            ValidationError::UnsupportedContent { .. } => "unsupported_content",
            ValidationError::UnsupportedToolCall { .. } => "unsupported_tool_call",
            ValidationError::UnsupportedRole { .. } => "unsupported_role",
            ValidationError::InvalidTerminalRole { .. } => "invalid_terminal_role",
            ValidationError::InvalidStreamingFanout { .. } => "invalid_streaming_fanout",
        }
    }
}

fn join_fields(fields: &[UnsupportedField]) -> String {
    fields.iter().map(UnsupportedField::as_str).collect::<Vec<_>>().join(", ")
}

fn describe_role_violation(index: &usize, role: &Role) -> String {
    match role {
        Role::System => format!(
            "System message at index {} is not supported; only the first message may be a system message",
            index
        ),
        _ => format!("Message at index {} has role `{}`, which is not supported", index, role),
    }
}

fn describe_terminal(role: &Option<Role>) -> String {
    match role {
        Some(role) => format!("`{}`", role),
        None => "no messages".to_string(),
    }
}

/// # Validate a chat completion request
///
/// Runs every check in order and returns the first failure. Safe to call
/// from any thread; it only reads `request`.
pub fn validate_request(request: &ChatCompletionRequest) -> Result<(), ValidationError> {
    let result = check_unsupported_fields(request)
        .and_then(|()| check_messages(&request.messages))
        .and_then(|()| check_terminal_role(&request.messages))
        .and_then(|()| check_streaming_fanout(request));

    match &result {
        Ok(()) => debug!(
            message_count = request.messages.len(),
            stream = request.is_streaming(),
            "Chat completion request accepted"
        ),
        Err(err) => debug!(code = err.code(), error = %err, "Chat completion request rejected"),
    }

    result
}

/// Fails with every unsupported field present on `request`.
pub fn check_unsupported_fields(request: &ChatCompletionRequest) -> Result<(), ValidationError> {
    let fields: Vec<UnsupportedField> = UNSUPPORTED_FIELDS
        .iter()
        .copied()
        .filter(|field| field.is_present_in(request))
        .collect();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedField { fields })
    }
}

/// Per-message shape rules.
pub fn check_messages(messages: &[Message]) -> Result<(), ValidationError> {
    for (index, message) in messages.iter().enumerate() {
        match message {
            Message::System(_) => {
                if index != 0 {
                    return Err(ValidationError::UnsupportedRole {
                        index,
                        role: Role::System,
                    });
                }
            }
            Message::User(user) => {
                if let UserContent::Parts(parts) = &user.content {
                    return Err(ValidationError::UnsupportedContent {
                        index,
                        content: serde_json::to_string(parts).unwrap_or_default(),
                    });
                }
            }
            Message::Assistant(assistant) => {
                // key presence: `"tool_calls": null` counts
                if assistant.tool_calls.is_some() {
                    return Err(ValidationError::UnsupportedToolCall { index });
                }
            }
            Message::Tool(_) => {
                return Err(ValidationError::UnsupportedRole {
                    index,
                    role: Role::Tool,
                });
            }
        }
    }
    Ok(())
}

/// The engine can only answer a user turn.
pub fn check_terminal_role(messages: &[Message]) -> Result<(), ValidationError> {
    match messages.last().map(Message::role) {
        Some(Role::User) => Ok(()),
        role => Err(ValidationError::InvalidTerminalRole { role }),
    }
}

/// One decoding sequence per streamed call.
pub fn check_streaming_fanout(request: &ChatCompletionRequest) -> Result<(), ValidationError> {
    match request.n {
        Some(n) if request.is_streaming() && n > 1 => {
            Err(ValidationError::InvalidStreamingFanout { n })
        }
        _ => Ok(()),
    }
}
