//! # Engine Boundary
//!
//! The contract between the gate and whatever runs inference. An engine only
//! ever sees requests that passed [`validate_request`]; it owns every field
//! of the response (`id`, `created`, `model`, `choices`, `usage`).

use std::fmt;

use futures::stream::BoxStream;
use futures::TryStreamExt;
use tracing::{debug, info, warn};

use crate::{
    error::GateError,
    schemas::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest},
    validation::validate_request,
    Result,
};

/// Chunks of one streamed completion, in order.
pub type ChunkStream = BoxStream<'static, Result<ChatCompletionChunk>>;

/// Inference engine trait
#[async_trait::async_trait]
pub trait ChatEngine: Send + Sync {
    /// Engine name for logging
    fn name(&self) -> &'static str;

    /// Produce a full completion.
    async fn generate(&self, request: ChatCompletionRequest) -> Result<ChatCompletion>;

    /// Produce a completion as a stream of chunks. A caller-cancelled
    /// generation ends with `finish_reason = abort`.
    async fn generate_stream(&self, request: ChatCompletionRequest) -> Result<ChunkStream>;
}

/// What [`dispatch`] handed back.
pub enum Dispatched {
    Completion(ChatCompletion),
    Stream(ChunkStream),
}

impl Dispatched {
    pub fn is_stream(&self) -> bool {
        matches!(self, Dispatched::Stream(_))
    }

    pub fn into_completion(self) -> Option<ChatCompletion> {
        match self {
            Dispatched::Completion(completion) => Some(completion),
            Dispatched::Stream(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<ChunkStream> {
        match self {
            Dispatched::Stream(stream) => Some(stream),
            Dispatched::Completion(_) => None,
        }
    }
}

impl fmt::Debug for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatched::Completion(completion) => {
                f.debug_tuple("Completion").field(completion).finish()
            }
            Dispatched::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// # Validate and dispatch
///
/// Validates `request` exactly once. On failure the error is returned as-is
/// and the engine is never called. On success the unchanged request goes to
/// `generate_stream` when `stream` is true, otherwise to `generate`.
pub async fn dispatch<E>(engine: &E, request: ChatCompletionRequest) -> Result<Dispatched>
where
    E: ChatEngine + ?Sized,
{
    if let Err(err) = validate_request(&request) {
        warn!(
            engine = engine.name(),
            code = err.code(),
            "Rejected chat completion request: {}",
            err
        );
        return Err(GateError::Validation(err));
    }

    let stream = request.is_streaming();
    debug!(
        engine = engine.name(),
        message_count = request.messages.len(),
        stream = stream,
        "Dispatching chat completion request"
    );

    if stream {
        let chunks = engine.generate_stream(request).await?;
        info!(engine = engine.name(), "Started streamed chat completion");
        Ok(Dispatched::Stream(chunks))
    } else {
        let completion = engine.generate(request).await?;
        info!(
            engine = engine.name(),
            id = %completion.id,
            choices = completion.choices.len(),
            "Completed chat completion"
        );
        Ok(Dispatched::Completion(completion))
    }
}

/// Drain a chunk stream, stopping at the first error.
pub async fn collect_stream(stream: ChunkStream) -> Result<Vec<ChatCompletionChunk>> {
    stream.try_collect().await
}
