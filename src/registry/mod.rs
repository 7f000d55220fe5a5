//! Registry of caller-supplied functions the model may call.

pub mod function;
pub mod schema;
pub mod validation;

pub use function::{ChatFunction, FnFunction};
pub use schema::{FunctionDefinition, Parameters};
pub use validation::validate_arguments;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Why a function call could not produce a result.
///
/// Every variant is recoverable conversation data: the conversation renders
/// it into a function-result message for the model instead of failing the
/// caller's turn.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("Function '{0}' is not registered")]
    NotRegistered(String),

    #[error("Arguments are not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Arguments rejected by schema: {0}")]
    SchemaRejected(String),

    #[error("Function '{name}' failed: {message}")]
    Execution { name: String, message: String },
}

/// Maps function names to executable units with declared parameter schemas.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn ChatFunction>>,
    // registration order, so definitions() is deterministic
    order: Vec<String>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, returning its schema descriptor.
    ///
    /// Re-registering a name replaces the previous function.
    pub fn register<F>(&mut self, function: F) -> FunctionDefinition
    where
        F: ChatFunction + 'static,
    {
        self.register_arc(Arc::new(function))
    }

    /// Register an already-shared function.
    pub fn register_arc(&mut self, function: Arc<dyn ChatFunction>) -> FunctionDefinition {
        let name = function.name().to_string();
        let definition = FunctionDefinition {
            name: name.clone(),
            description: function.description().to_string(),
            parameters: function.parameters().schema.clone(),
        };
        if self.functions.insert(name.clone(), function).is_none() {
            self.order.push(name.clone());
        }
        debug!(function = %name, "registered chat function");
        definition
    }

    /// Schema descriptors for all registered functions, in registration
    /// order.
    pub fn definitions(&self) -> Vec<FunctionDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.functions.get(name))
            .map(|f| FunctionDefinition {
                name: f.name().to_string(),
                description: f.description().to_string(),
                parameters: f.parameters().schema.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Parse and validate `arguments_text`, then execute the named function.
    ///
    /// The returned content is what gets fed back to the model: bare text
    /// for string results, compact JSON for everything else.
    pub async fn call(&self, name: &str, arguments_text: &str) -> Result<String, CallError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| CallError::NotRegistered(name.to_string()))?;

        let text = if arguments_text.trim().is_empty() {
            "{}"
        } else {
            arguments_text
        };
        let args: serde_json::Value = serde_json::from_str(text)?;

        validate_arguments(&args, &function.parameters().schema)
            .map_err(CallError::SchemaRejected)?;

        let result = function
            .invoke(args)
            .await
            .map_err(|e| CallError::Execution {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(match result {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.order)
            .finish()
    }
}
