//! The conversation: history, dispatch loop, and caller-facing surface.

use std::sync::Arc;

use bon::bon;
use futures::StreamExt;
use tracing::debug;

use crate::assembler::StreamAssembler;
use crate::display::{DisplaySink, NullSink};
use crate::endpoint::{ChatEndpoint, ChatRequest};
use crate::error::{ParleyError, Result};
use crate::registry::{ChatFunction, FunctionDefinition, FunctionRegistry};
use crate::store::MessageStore;
use crate::types::{FinishReason, Message};

/// A caller-provided input: plain text becomes a human message, a
/// [`Message`] is appended as-is.
#[derive(Debug, Clone)]
pub enum Input {
    Text(String),
    Message(Message),
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Message> for Input {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<Input> for Message {
    fn from(input: Input) -> Self {
        match input {
            Input::Text(text) => Message::human(text),
            Input::Message(message) => message,
        }
    }
}

/// A multi-turn conversation with a streaming chat model.
///
/// One `submit` call is one logical turn: input is appended to the history,
/// a stream is opened with the full history as context, and the response is
/// assembled incrementally. When the model finishes with a function call,
/// the call is dispatched against the registry, the attempt and its result
/// are appended, and the loop resubmits with no new input until the model
/// produces a plain answer.
///
/// Not internally synchronized: one conversation belongs to one caller, and
/// `&mut self` on the mutating operations serializes use. Cancellation is
/// dropping the `submit` future; only fully flushed messages are ever
/// visible in the history.
pub struct Conversation {
    endpoint: Arc<dyn ChatEndpoint>,
    model: String,
    store: MessageStore,
    registry: FunctionRegistry,
    sink: Arc<dyn DisplaySink>,
    max_turns: usize,
}

#[bon]
impl Conversation {
    /// Build a conversation.
    ///
    /// Only `endpoint` is required. `max_turns` caps function-call
    /// iterations within a single `submit`; the remote model decides when
    /// to stop calling functions, so the cap is the safety valve against
    /// runaway recursion.
    #[builder]
    pub fn new(
        endpoint: Arc<dyn ChatEndpoint>,
        #[builder(into, default = "gpt-4o-mini".to_string())] model: String,
        #[builder(default)] registry: FunctionRegistry,
        sink: Option<Arc<dyn DisplaySink>>,
        #[builder(default = 20)] max_turns: usize,
        initial_context: Option<Vec<Message>>,
    ) -> Result<Self> {
        let mut store = MessageStore::new();
        for message in initial_context.unwrap_or_default() {
            store.append(message)?;
        }
        Ok(Self {
            endpoint,
            model,
            store,
            registry,
            sink: sink.unwrap_or_else(|| Arc::new(NullSink)),
            max_turns,
        })
    }

    /// Append inputs to the history without contacting the model.
    pub fn append<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Input>,
    {
        for input in inputs {
            let input: Input = input.into();
            self.store.append(Message::from(input))?;
        }
        Ok(())
    }

    /// Register a function the model may call.
    pub fn register<F>(&mut self, function: F) -> FunctionDefinition
    where
        F: ChatFunction + 'static,
    {
        self.registry.register(function)
    }

    /// Send inputs to the model and drive the response to completion,
    /// dispatching any function calls it makes along the way.
    pub async fn submit<I, T>(&mut self, inputs: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Input>,
    {
        self.append(inputs)?;

        let mut iteration = 0usize;
        loop {
            iteration += 1;
            if iteration > self.max_turns {
                return Err(ParleyError::TurnLimit(self.max_turns));
            }

            let request = ChatRequest {
                model: self.model.clone(),
                messages: self.store.snapshot(),
                functions: if self.registry.is_empty() {
                    Vec::new()
                } else {
                    self.registry.definitions()
                },
            };

            debug!(
                model = %self.model,
                iteration,
                history = request.messages.len(),
                "submitting turn"
            );

            let mut stream = self.endpoint.stream_chat(&request).await?;
            let mut assembler = StreamAssembler::new();
            let mut finish = None;

            while let Some(event) = stream.next().await {
                if let Some(reason) =
                    assembler.apply(event?, &mut self.store, self.sink.as_ref())?
                {
                    finish = Some(reason);
                    break;
                }
            }
            drop(stream);

            if finish == Some(FinishReason::FunctionCall) {
                self.dispatch_call(&mut assembler).await?;
                // reply with the result and let the model continue
                continue;
            }

            assembler.flush_text(&mut self.store)?;
            match finish {
                Some(FinishReason::Stop) => {}
                Some(FinishReason::MaxTokens) | Some(FinishReason::Length) => {
                    self.sink
                        .notice("...max tokens or overall length is too high...");
                }
                Some(FinishReason::ContentFilter) => {
                    self.sink
                        .notice("...content omitted due to the provider's content filter...");
                }
                Some(FinishReason::Unknown(raw)) => {
                    self.sink.notice(&format!("...unknown finish reason: {raw}..."));
                }
                Some(FinishReason::FunctionCall) => unreachable!("handled above"),
                None => {
                    debug!("stream ended without a finish reason");
                }
            }

            debug!(iteration, history = self.store.len(), "turn complete");
            return Ok(());
        }
    }

    /// History snapshot, in order.
    pub fn history(&self) -> Vec<Message> {
        self.store.snapshot()
    }

    pub fn clear_history(&mut self) {
        self.store.clear();
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Execute the completed function call and append the attempt plus its
    /// result. A failed call is conversation data for the model, not an
    /// error for the caller.
    async fn dispatch_call(&mut self, assembler: &mut StreamAssembler) -> Result<()> {
        let call = assembler.take_call().ok_or_else(|| {
            ParleyError::Protocol("function call finished without a function name".to_string())
        })?;

        let arguments = if call.arguments.is_empty() {
            "{}".to_string()
        } else {
            call.arguments
        };

        self.store
            .append(Message::assistant_function_call(&call.name, &arguments))?;

        let content = match self.registry.call(&call.name, &arguments).await {
            Ok(content) => {
                self.sink.function_call_result(&content, false);
                content
            }
            Err(err) => {
                let content = err.to_string();
                self.sink.function_call_result(&content, true);
                content
            }
        };

        self.store
            .append(Message::function_result(&call.name, content))?;
        Ok(())
    }
}
