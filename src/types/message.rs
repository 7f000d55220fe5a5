//! Message types for model communication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    /// Text content. Absent on assistant messages that only carry a
    /// function call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Function name, set on function-result messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The call the assistant asked for, set on assistant messages that
    /// requested a function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(text.into()),
            name: None,
            function_call: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a human message.
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: Some(text.into()),
            name: None,
            function_call: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a plain assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(text.into()),
            name: None,
            function_call: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create an assistant message recording a function-call attempt.
    ///
    /// `arguments` is the raw argument text as streamed by the model, not
    /// yet parsed or validated.
    pub fn assistant_function_call(
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            name: None,
            function_call: Some(FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            }),
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a function-result message.
    pub fn function_result(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::FunctionResult,
            content: Some(content.into()),
            name: Some(name.into()),
            function_call: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Text content, or the empty string when absent.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Conversation role.
///
/// Wire names follow the OpenAI chat API: `Human` serializes as `user`,
/// `FunctionResult` as `function`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    Human,
    Assistant,
    #[serde(rename = "function")]
    #[strum(serialize = "function")]
    FunctionResult,
}

/// A function call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// Raw argument text, concatenated in arrival order.
    pub arguments: String,
}
