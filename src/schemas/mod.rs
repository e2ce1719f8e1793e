//! # Schemas Module
//!
//! Wire types for OpenAI-style chat completions: the request envelope the
//! gate validates, and the completion and chunk shapes an engine produces.

pub mod chunk;
pub mod request;
pub mod response;

pub use chunk::{
    ChatCompletionChunk, ChunkChoice, ChunkDelta, FunctionCallDelta, ToolCallDelta,
    CHAT_COMPLETION_CHUNK_OBJECT,
};
pub use request::{
    AssistantMessage, ChatCompletionRequest, ContentPart, FunctionCall, ImageDetail, ImageUrl,
    Message, Role, StopSequences, SystemMessage, ToolCall, ToolCallKind, ToolMessage, UserContent,
    UserMessage,
};
pub use response::{
    completion_id, unix_timestamp, ChatCompletion, ChatCompletionMessage, Choice, FinishReason,
    ResponseRole, Usage, UsageExtra, CHAT_COMPLETION_OBJECT,
};
