//! Remote chat endpoint collaborator.

pub mod http;
pub mod openai;

pub use openai::OpenAiEndpoint;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::ParleyError;
use crate::registry::FunctionDefinition;
use crate::types::{Message, StreamEvent};

/// One streaming chat request: the full history plus the available
/// functions.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    /// Registered function schemas. An empty list must not be serialized
    /// into the wire request; some endpoints reject an empty function set.
    pub functions: Vec<FunctionDefinition>,
}

/// A remote endpoint that streams partial-response events.
///
/// The returned stream is finite and consumed exactly once. Dropping it
/// cancels the underlying request.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, ParleyError>>, ParleyError>;
}
