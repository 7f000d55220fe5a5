//! OpenAI Chat Completions streaming endpoint.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ParleyConfig;
use crate::error::ParleyError;
use crate::types::{FinishReason, FunctionCall, Message, Role, StreamEvent};

use super::http::{bearer_headers, parse_sse_data, shared_client};
use super::{ChatEndpoint, ChatRequest};

/// Streams chat completions from the OpenAI API (or any compatible server).
#[derive(Debug)]
pub struct OpenAiEndpoint {
    api_key: String,
    base_url: String,
}

impl OpenAiEndpoint {
    /// Create from a config. Fails before any turn starts when no
    /// credential is configured.
    pub fn new(config: &ParleyConfig) -> Result<Self, ParleyError> {
        let api_key = config.api_key().ok_or_else(|| {
            ParleyError::Configuration(
                "No API key configured. Set the OPENAI_API_KEY environment variable \
                 or use ParleyConfig::with_api_key."
                    .to_string(),
            )
        })?;
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    /// Create from `OPENAI_API_KEY` / `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, ParleyError> {
        Self::new(&ParleyConfig::from_env())
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_wire)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
            "stream": true,
        });

        // An empty function set must not be sent; some servers reject it.
        if !request.functions.is_empty() {
            let obj = body.as_object_mut().expect("body is an object");
            obj.insert(
                "functions".into(),
                serde_json::to_value(&request.functions).expect("definitions serialize"),
            );
            obj.insert("function_call".into(), "auto".into());
        }

        body
    }
}

#[async_trait]
impl ChatEndpoint for OpenAiEndpoint {
    async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, ParleyError>>, ParleyError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            functions = request.functions.len(),
            "opening chat completion stream"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(ParleyError::api(status, body_text));
        }

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut buffer = String::new();
            let mut finished = false;
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(ParleyError::Network(e));
                        break;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    let Some(data) = parse_sse_data(&line) else {
                        continue;
                    };

                    let chunk: ChatChunk = match serde_json::from_str(data) {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            // upstream inconsistencies should not abort an
                            // otherwise-healthy conversation
                            warn!(error = %e, "skipping unparseable stream record");
                            continue;
                        }
                    };

                    let Some(choice) = chunk.choices.into_iter().next() else {
                        warn!("stream record has no choices, skipping");
                        continue;
                    };

                    if let Some(delta) = choice.delta {
                        if let Some(text) = delta.content {
                            yield Ok(StreamEvent::TextDelta(text));
                        }
                        if let Some(call) = delta.function_call {
                            if let Some(name) = call.name {
                                yield Ok(StreamEvent::FunctionCallNameDelta(name));
                            }
                            if let Some(arguments) = call.arguments {
                                yield Ok(StreamEvent::FunctionCallArgsDelta(arguments));
                            }
                        }
                    }

                    if let Some(reason) = choice.finish_reason {
                        yield Ok(StreamEvent::Finish(FinishReason::parse(&reason)));
                        finished = true;
                        break;
                    }
                }

                if finished {
                    break;
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

fn message_to_wire(msg: &Message) -> serde_json::Value {
    let role = match msg.role {
        Role::System => "system",
        Role::Human => "user",
        Role::Assistant => "assistant",
        Role::FunctionResult => "function",
    };

    match msg.role {
        Role::FunctionResult => serde_json::json!({
            "role": role,
            "name": &msg.name,
            "content": msg.text(),
        }),
        Role::Assistant if msg.function_call.is_some() => {
            let FunctionCall { name, arguments } =
                msg.function_call.as_ref().expect("checked above");
            serde_json::json!({
                "role": role,
                "content": &msg.content,
                "function_call": { "name": name, "arguments": arguments },
            })
        }
        _ => serde_json::json!({ "role": role, "content": msg.text() }),
    }
}

// OpenAI wire chunk shapes (internal)

#[derive(Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    function_call: Option<ChunkFunctionCall>,
}

#[derive(Deserialize)]
struct ChunkFunctionCall {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_for_function_result() {
        let msg = Message::function_result("add", "2");
        let wire = message_to_wire(&msg);
        assert_eq!(wire["role"], "function");
        assert_eq!(wire["name"], "add");
        assert_eq!(wire["content"], "2");
    }

    #[test]
    fn wire_format_for_assistant_function_call() {
        let msg = Message::assistant_function_call("add", r#"{"a":1}"#);
        let wire = message_to_wire(&msg);
        assert_eq!(wire["role"], "assistant");
        assert_eq!(wire["content"], serde_json::Value::Null);
        assert_eq!(wire["function_call"]["name"], "add");
        assert_eq!(wire["function_call"]["arguments"], r#"{"a":1}"#);
    }

    #[test]
    fn wire_format_for_human_text() {
        let wire = message_to_wire(&Message::human("hi"));
        assert_eq!(wire["role"], "user");
        assert_eq!(wire["content"], "hi");
    }

    #[test]
    fn functions_omitted_from_body_when_empty() {
        let endpoint = OpenAiEndpoint {
            api_key: "key".into(),
            base_url: "http://localhost".into(),
        };
        let body = endpoint.build_request_body(&ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![Message::human("hi")],
            functions: Vec::new(),
        });
        assert!(body.get("functions").is_none());
        assert!(body.get("function_call").is_none());
        assert_eq!(body["stream"], true);
    }
}
