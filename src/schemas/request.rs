//! # Request Schema
//!
//! The closed set of shapes a caller may submit to `/v1/chat/completions`.
//! Messages and content parts are internally tagged enums, so an unknown
//! `role` or `type` never gets past deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::GateError;
use crate::validation::{self, ValidationError};

/// Role tag of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Message
///
/// One entry of the conversation, discriminated by `role` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
    Tool(ToolMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: UserContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// `null` is legal here, e.g. for a turn that only carried tool calls
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some` whenever the key was sent, even as `null`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Option<Vec<ToolCall>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub content: String,
    /// ID of the assistant tool call this message answers
    pub tool_call_id: String,
}

impl Message {
    /// # Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Message::System(SystemMessage { content: content.into() })
    }

    /// # Create a plain-text user message
    pub fn user(content: impl Into<String>) -> Self {
        Message::User(UserMessage {
            content: UserContent::Text(content.into()),
            name: None,
        })
    }

    /// # Create a multi-part user message
    ///
    /// Part of the schema, but rejected by the validator.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Message::User(UserMessage {
            content: UserContent::Parts(parts),
            name: None,
        })
    }

    /// # Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant(AssistantMessage {
            content: Some(content.into()),
            name: None,
            tool_calls: None,
        })
    }

    /// # Create an assistant message carrying tool calls
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Message::Assistant(AssistantMessage {
            content: None,
            name: None,
            tool_calls: Some(Some(tool_calls)),
        })
    }

    /// # Create a tool result message
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool(ToolMessage {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System(_) => Role::System,
            Message::User(_) => Role::User,
            Message::Assistant(_) => Role::Assistant,
            Message::Tool(_) => Role::Tool,
        }
    }
}

/// User content: a plain string or a list of content parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl UserContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            UserContent::Text(text) => Some(text),
            UserContent::Parts(_) => None,
        }
    }
}

impl From<&str> for UserContent {
    fn from(text: &str) -> Self {
        UserContent::Text(text.to_string())
    }
}

impl From<String> for UserContent {
    fn from(text: String) -> Self {
        UserContent::Text(text)
    }
}

/// One unit of multi-modal user content, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>, detail: Option<ImageDetail>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into(), detail },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Either an http(s) URL or a base64 `data:` URL
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Auto,
    Low,
    High,
}

/// # Tool Call
///
/// A function invocation emitted by the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ToolCallKind,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallKind {
    #[default]
    Function,
}

/// Function name plus JSON-encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ToolCallKind::Function,
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// `stop` accepts a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequences {
    One(String),
    Many(Vec<String>),
}

impl StopSequences {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            StopSequences::One(stop) => vec![stop.clone()],
            StopSequences::Many(stops) => stops.clone(),
        }
    }
}

/// Keeps key presence through deserialization: an absent key stays `None`
/// via `#[serde(default)]`, any value including `null` becomes `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// # Chat Completion Request
///
/// The request envelope. The first block of fields is what the engine can
/// execute. The second block is declared for wire compatibility only: any
/// JSON value is accepted, including `null`, so that a request using them
/// always parses and is rejected by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Conversation so far; the last entry must be a user turn
    pub messages: Vec<Message>,
    /// Whether to stream the response as chunks (absent means false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Number of choices to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    /// Upper bound on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gen_len: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopSequences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub seed: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
}

impl ChatCompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// # Parse a request from JSON text
    ///
    /// Parse failures are reported as [`GateError::Parse`], never as
    /// validation errors.
    pub fn from_json(json: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Same as [`from_json`](Self::from_json) for raw bytes; invalid UTF-8
    /// is a parse error too.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GateError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_value(value: Value) -> Result<Self, GateError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_gen_len(mut self, max_gen_len: u32) -> Self {
        self.max_gen_len = Some(max_gen_len);
        self
    }

    pub fn with_stop(mut self, stop: StopSequences) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(false)
    }

    /// Validate against the supported subset. See [`validation::validate_request`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_request(self)
    }

    /// Names of the unsupported fields present on this request, in
    /// [`validation::UNSUPPORTED_FIELDS`] order.
    pub fn present_unsupported_fields(&self) -> Vec<&'static str> {
        validation::UNSUPPORTED_FIELDS
            .iter()
            .filter(|field| field.is_present_in(self))
            .map(|field| field.as_str())
            .collect()
    }
}
