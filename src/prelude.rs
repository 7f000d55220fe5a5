//! Convenience re-exports.

pub use crate::config::ParleyConfig;
pub use crate::conversation::{Conversation, Input};
pub use crate::display::{DisplaySink, NullSink, WriterSink};
pub use crate::endpoint::{ChatEndpoint, ChatRequest, OpenAiEndpoint};
pub use crate::error::{ParleyError, Result};
pub use crate::registry::{
    ChatFunction, FnFunction, FunctionDefinition, FunctionRegistry, Parameters,
};
pub use crate::store::MessageStore;
pub use crate::types::{FinishReason, FunctionCall, Message, Role, StreamEvent};
