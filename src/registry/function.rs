//! Function trait and closure-based wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use super::schema::Parameters;
use crate::error::ParleyError;

/// A callable the model may invoke.
///
/// Implement this to expose custom functions, or use [`FnFunction`] for
/// quick closure-based registration.
#[async_trait]
pub trait ChatFunction: Send + Sync {
    /// Function name (what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description, sent to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the parameters.
    fn parameters(&self) -> &Parameters;

    /// Execute with parsed, validated arguments.
    async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value, ParleyError>;
}

type Handler = dyn Fn(serde_json::Value) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ParleyError>> + Send>>
    + Send
    + Sync;

/// Closure-based function for quick registration.
pub struct FnFunction {
    name: String,
    description: String,
    parameters: Parameters,
    handler: Arc<Handler>,
}

impl FnFunction {
    /// Create a function from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Parameters,
        handler: F,
    ) -> Self
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, ParleyError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }
}

#[async_trait]
impl ChatFunction for FnFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value, ParleyError> {
        (self.handler)(args).await
    }
}

impl std::fmt::Debug for FnFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFunction")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
