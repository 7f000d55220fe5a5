//! Display sink for incremental output.
//!
//! Purely observational: the conversation never depends on a sink's
//! behavior, and sink I/O failures are swallowed.

use std::io::Write;
use std::sync::Mutex;

/// Receives incremental text and the function-call lifecycle.
///
/// All methods default to no-ops so implementations only override what they
/// render.
pub trait DisplaySink: Send + Sync {
    /// Incremental assistant text.
    fn text_delta(&self, _text: &str) {}

    /// A function call was declared with this name.
    fn function_call_start(&self, _name: &str) {}

    /// Argument text appended to the current function call.
    fn function_call_arguments(&self, _text: &str) {}

    /// The function call completed. `is_error` marks execution failures
    /// that were fed back to the model.
    fn function_call_result(&self, _content: &str, _is_error: bool) {}

    /// Display-only annotation for non-stop stream terminations
    /// (truncation, moderation, unknown finish reasons).
    fn notice(&self, _text: &str) {}
}

/// Sink that discards everything. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {}

/// Sink that writes plain text to any [`std::io::Write`].
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn write(&self, text: &str) {
        if let Ok(mut w) = self.writer.lock() {
            let _ = w.write_all(text.as_bytes());
            let _ = w.flush();
        }
    }
}

impl<W: Write + Send> DisplaySink for WriterSink<W> {
    fn text_delta(&self, text: &str) {
        self.write(text);
    }

    fn function_call_start(&self, name: &str) {
        self.write(&format!("\n[calling {name}] "));
    }

    fn function_call_arguments(&self, text: &str) {
        self.write(text);
    }

    fn function_call_result(&self, content: &str, is_error: bool) {
        let label = if is_error { "error" } else { "result" };
        self.write(&format!("\n[{label}] {content}\n"));
    }

    fn notice(&self, text: &str) {
        self.write(&format!("\n{text}\n"));
    }
}
