//! Shared test doubles: a scripted endpoint and a recording display sink.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use parley::display::DisplaySink;
use parley::endpoint::{ChatEndpoint, ChatRequest};
use parley::error::ParleyError;
use parley::types::StreamEvent;

/// Endpoint that replays queued event scripts and captures every request.
#[derive(Default)]
pub struct MockEndpoint {
    scripts: Mutex<VecDeque<Vec<Result<StreamEvent, ParleyError>>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockEndpoint {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue one stream's worth of events.
    pub fn queue(&self, events: Vec<StreamEvent>) {
        self.scripts
            .lock()
            .unwrap()
            .push_back(events.into_iter().map(Ok).collect());
    }

    /// Queue a script that may include mid-stream errors.
    pub fn queue_results(&self, events: Vec<Result<StreamEvent, ParleyError>>) {
        self.scripts.lock().unwrap().push_back(events);
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatEndpoint for MockEndpoint {
    async fn stream_chat(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent, ParleyError>>, ParleyError> {
        self.requests.lock().unwrap().push(request.clone());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ParleyError::Stream("no scripted response queued".to_string()))?;
        Ok(futures::stream::iter(script).boxed())
    }
}

/// Sink that records every display call as a tagged string.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl DisplaySink for RecordingSink {
    fn text_delta(&self, text: &str) {
        self.record(format!("text:{text}"));
    }

    fn function_call_start(&self, name: &str) {
        self.record(format!("call:{name}"));
    }

    fn function_call_arguments(&self, text: &str) {
        self.record(format!("args:{text}"));
    }

    fn function_call_result(&self, content: &str, is_error: bool) {
        let tag = if is_error { "error" } else { "result" };
        self.record(format!("{tag}:{content}"));
    }

    fn notice(&self, text: &str) {
        self.record(format!("notice:{text}"));
    }
}
