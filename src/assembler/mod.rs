//! Incremental reconstruction of one streamed response.

use crate::display::DisplaySink;
use crate::error::{ParleyError, Result};
use crate::store::MessageStore;
use crate::types::{FinishReason, Message, StreamEvent};

/// Accumulator for a function call being built up across deltas.
///
/// Lives for the duration of one stream; resolved into a completed call or
/// discarded when the stream ends without one.
#[derive(Debug, Clone, Default)]
pub struct PendingFunctionCall {
    pub name: String,
    /// Argument text concatenated in arrival order.
    pub arguments: String,
}

/// Folds stream events into either accumulated text or an accumulating
/// function-call record.
///
/// Holds no state across streams: construct one per stream. Events are
/// processed strictly in arrival order with no buffering beyond the two
/// accumulators.
#[derive(Debug, Default)]
pub struct StreamAssembler {
    text: String,
    call: Option<PendingFunctionCall>,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one event.
    ///
    /// Returns `Some(reason)` when the stream terminated. Text deltas are
    /// accumulated, not flushed; the accumulated text moves into `store`
    /// only when a function-call delta arrives (the assistant message is
    /// complete at that point) or when the caller flushes after the stream
    /// ends.
    pub fn apply(
        &mut self,
        event: StreamEvent,
        store: &mut MessageStore,
        sink: &dyn DisplaySink,
    ) -> Result<Option<FinishReason>> {
        match event {
            StreamEvent::TextDelta(text) => {
                sink.text_delta(&text);
                self.text.push_str(&text);
                Ok(None)
            }
            StreamEvent::FunctionCallNameDelta(name) => {
                match self.call.as_mut() {
                    Some(call) => call.name.push_str(&name),
                    None => {
                        // the assistant message, if any, is finished now
                        self.flush_text(store)?;
                        sink.function_call_start(&name);
                        self.call = Some(PendingFunctionCall {
                            name,
                            arguments: String::new(),
                        });
                    }
                }
                Ok(None)
            }
            StreamEvent::FunctionCallArgsDelta(arguments) => {
                let call = self.call.as_mut().ok_or_else(|| {
                    ParleyError::Protocol(
                        "function call arguments arrived before a function name".to_string(),
                    )
                })?;
                sink.function_call_arguments(&arguments);
                call.arguments.push_str(&arguments);
                Ok(None)
            }
            StreamEvent::Finish(reason) => Ok(Some(reason)),
        }
    }

    /// Move any non-empty pending text into the store as a completed
    /// assistant message.
    pub fn flush_text(&mut self, store: &mut MessageStore) -> Result<()> {
        if !self.text.trim().is_empty() {
            store.append(Message::assistant(std::mem::take(&mut self.text)))?;
        } else {
            self.text.clear();
        }
        Ok(())
    }

    /// Take the completed function call, if one was established.
    pub fn take_call(&mut self) -> Option<PendingFunctionCall> {
        self.call.take().filter(|c| !c.name.is_empty())
    }
}
