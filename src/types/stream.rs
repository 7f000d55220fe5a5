//! Streaming types.

use serde::{Deserialize, Serialize};

/// One incremental unit of the remote model's response.
///
/// Within one stream, events arrive in a fixed order relative to each other
/// and are processed strictly in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Incremental assistant text.
    TextDelta(String),
    /// Incremental function name. Observed usage sends the full name in a
    /// single delta, but deltas are concatenated regardless.
    FunctionCallNameDelta(String),
    /// Incremental function argument text.
    FunctionCallArgsDelta(String),
    /// Stream termination; the sole exit point of a stream.
    Finish(FinishReason),
}

/// Why the stream ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    FunctionCall,
    MaxTokens,
    Length,
    ContentFilter,
    /// Anything the wire sends that we do not recognize, carried raw so it
    /// can be surfaced in diagnostics.
    #[serde(untagged)]
    Unknown(String),
}

impl FinishReason {
    /// Map a wire `finish_reason` string into a variant.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stop" => Self::Stop,
            "function_call" => Self::FunctionCall,
            "max_tokens" => Self::MaxTokens,
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => write!(f, "stop"),
            Self::FunctionCall => write!(f, "function_call"),
            Self::MaxTokens => write!(f, "max_tokens"),
            Self::Length => write!(f, "length"),
            Self::ContentFilter => write!(f, "content_filter"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_reasons() {
        assert_eq!(FinishReason::parse("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::parse("function_call"), FinishReason::FunctionCall);
        assert_eq!(FinishReason::parse("length"), FinishReason::Length);
        assert_eq!(FinishReason::parse("content_filter"), FinishReason::ContentFilter);
    }

    #[test]
    fn parse_carries_unknown_reason_raw() {
        let reason = FinishReason::parse("tool_use_exotic");
        assert_eq!(reason, FinishReason::Unknown("tool_use_exotic".to_string()));
        assert_eq!(reason.to_string(), "tool_use_exotic");
    }
}
