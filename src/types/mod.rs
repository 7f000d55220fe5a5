//! Core conversation types.

pub mod message;
pub mod stream;

pub use message::{FunctionCall, Message, Role};
pub use stream::{FinishReason, StreamEvent};
