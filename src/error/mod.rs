//! Error types for Parley.

use thiserror::Error;

/// Primary error type for all Parley operations.
///
/// Function execution failures never show up here: they are recoverable
/// conversation data and are appended to the history as a function-result
/// message instead (see [`crate::registry::CallError`]).
#[derive(Error, Debug)]
pub enum ParleyError {
    /// Missing or invalid setup, surfaced before any turn starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote stream violated the function-call protocol. Fatal for the
    /// current turn; nothing partial is appended to the history.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A function-result message was appended without a matching assistant
    /// function-call message directly before it. Programmer error.
    #[error("Orphaned function result: {0}")]
    OrphanedResult(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    /// The function-call loop exceeded the configured iteration guard.
    #[error("Turn exceeded {0} function-call iterations")]
    TurnLimit(usize),
}

impl ParleyError {
    /// Create an API error from an HTTP status and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ParleyError>;
