//! # Response Schema
//!
//! Non-streaming completion shapes. These are produced by the engine and are
//! read-only for the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::ToolCall;

/// Object tag of a [`ChatCompletion`]
pub const CHAT_COMPLETION_OBJECT: &str = "chat.completion";

/// Why generation for a choice stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop or a stop sequence was hit
    Stop,
    /// `max_gen_len` or the context window was reached
    Length,
    /// The model called a tool
    ToolCalls,
    /// The caller cancelled generation. Never produced by a normal finish.
    Abort,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ToolCalls => "tool_calls",
            FinishReason::Abort => "abort",
        }
    }
}

/// Role of a generated message. Responses only ever speak as the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseRole {
    #[default]
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    pub role: ResponseRole,
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatCompletionMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ResponseRole::Assistant,
            content: Some(content.into()),
            tool_calls: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub finish_reason: FinishReason,
    pub message: ChatCompletionMessage,
    /// Always `null` in the supported subset
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
}

impl Choice {
    pub fn new(index: u32, message: ChatCompletionMessage, finish_reason: FinishReason) -> Self {
        Self {
            index,
            finish_reason,
            message,
            logprobs: None,
        }
    }
}

/// Token accounting for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<UsageExtra>,
}

/// Throughput figures some engines report alongside token counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageExtra {
    pub prefill_tokens_per_s: f64,
    pub decode_tokens_per_s: f64,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: UsageExtra) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// # Chat Completion
///
/// A full, non-streamed completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub choices: Vec<Choice>,
    pub model: String,
    pub object: String,
    /// Unix timestamp in seconds
    pub created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Build a completion with a fresh id and the current time.
    pub fn new(model: impl Into<String>, choices: Vec<Choice>, usage: Option<Usage>) -> Self {
        Self {
            id: completion_id(),
            choices,
            model: model.into(),
            object: CHAT_COMPLETION_OBJECT.to_string(),
            created: unix_timestamp(),
            usage,
        }
    }
}

/// New `chatcmpl-` prefixed completion id.
pub fn completion_id() -> String {
    format!("chatcmpl-{}", Uuid::new_v4().simple())
}

/// Current time as unix seconds.
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
