//! # Streaming Chunk Schema
//!
//! Shapes of the incremental pieces of a streamed completion. How chunks are
//! framed on the wire is up to the transport.

use serde::{Deserialize, Serialize};

use super::request::ToolCallKind;
use super::response::{FinishReason, ResponseRole, Usage};

/// Object tag of a [`ChatCompletionChunk`]
pub const CHAT_COMPLETION_CHUNK_OBJECT: &str = "chat.completion.chunk";

/// # Chat Completion Chunk
///
/// One incremental piece of a streamed completion. All chunks of a stream
/// share `id`, `model` and `created`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub choices: Vec<ChunkChoice>,
    pub created: i64,
    pub model: String,
    pub object: String,
    /// Only set on the final chunk, if at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionChunk {
    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        created: i64,
        choices: Vec<ChunkChoice>,
    ) -> Self {
        Self {
            id: id.into(),
            choices,
            created,
            model: model.into(),
            object: CHAT_COMPLETION_CHUNK_OBJECT.to_string(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// True once every choice in this chunk carries a finish reason.
    pub fn is_terminal(&self) -> bool {
        !self.choices.is_empty() && self.choices.iter().all(|choice| choice.finish_reason.is_some())
    }
}

/// # Chunk Choice
///
/// `finish_reason` stays `null` until the terminal chunk of this choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<FinishReason>,
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
}

impl ChunkChoice {
    pub fn new(index: u32, delta: ChunkDelta) -> Self {
        Self {
            index,
            delta,
            finish_reason: None,
            logprobs: None,
        }
    }

    /// Terminal choice with an empty delta.
    pub fn finished(index: u32, reason: FinishReason) -> Self {
        Self {
            index,
            delta: ChunkDelta::default(),
            finish_reason: Some(reason),
            logprobs: None,
        }
    }
}

/// Partial message fields. The role is only sent in the first delta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ResponseRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

impl ChunkDelta {
    /// First delta of a choice: announces the assistant role.
    pub fn start(content: impl Into<String>) -> Self {
        Self {
            role: Some(ResponseRole::Assistant),
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            role: None,
            content: Some(content.into()),
            tool_calls: None,
        }
    }
}

/// # Tool Call Delta
///
/// A tool call in flight; `id`, `type` and the function name arrive in the
/// first fragment, `arguments` is streamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallDelta {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ToolCallKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionCallDelta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}
