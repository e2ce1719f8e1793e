//! # chatgate - Chat Completion Request Gate
//!
//! Request/response types for an OpenAI-style chat completion API, and the
//! validation gate that decides whether a request is inside the subset an
//! inference engine can actually execute.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatgate::{ChatCompletionRequest, Message, ValidationError};
//!
//! let request = ChatCompletionRequest::new(vec![
//!     Message::system("You are helpful."),
//!     Message::user("Hi"),
//! ]);
//! assert!(request.validate().is_ok());
//!
//! let trailing = ChatCompletionRequest::new(vec![
//!     Message::user("Hi"),
//!     Message::assistant("Hello!"),
//! ]);
//! assert!(matches!(
//!     trailing.validate(),
//!     Err(ValidationError::InvalidTerminalRole { .. })
//! ));
//! ```
//!
//! ## Architecture
//!
//! - [`schemas`] - request, completion and chunk wire types
//! - [`validation`] - the request gate and the unsupported-field list
//! - [`engine`] - the inference engine trait and validate-then-dispatch
//! - [`error`] - crate error type and client-facing error bodies
//! - [`config`] - configuration for the `chatgate` binary

pub mod config;
pub mod engine;
pub mod error;
pub mod schemas;
pub mod validation;

pub use config::Config;
pub use engine::{collect_stream, dispatch, ChatEngine, ChunkStream, Dispatched};
pub use error::{ErrorDetails, ErrorResponse, GateError};
pub use schemas::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionMessage, ChatCompletionRequest, Choice,
    ChunkChoice, ChunkDelta, ContentPart, FinishReason, Message, Role, StopSequences, ToolCall,
    Usage, UserContent,
};
pub use validation::{
    validate_request, UnsupportedField, ValidationError, UNSUPPORTED_FIELDS,
    UNSUPPORTED_FIELDS_VERSION,
};

/// The result type used throughout the library
pub type Result<T> = std::result::Result<T, GateError>;
