//! Parley — streaming conversations with chat models.
//!
//! Drives a multi-turn conversation against an OpenAI-style chat endpoint
//! that streams its response and may ask for caller-registered functions to
//! be executed mid-conversation. Function results are fed back to the model
//! and the turn continues until the model produces a plain answer.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use parley::prelude::*;
//!
//! # async fn example() -> parley::error::Result<()> {
//! let endpoint = Arc::new(OpenAiEndpoint::from_env()?);
//! let mut conversation = Conversation::builder()
//!     .endpoint(endpoint)
//!     .model("gpt-4o-mini")
//!     .build()?;
//!
//! conversation.submit(["What are you?"]).await?;
//! for message in conversation.history() {
//!     println!("{}: {}", message.role, message.text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod conversation;
pub mod display;
pub mod endpoint;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod store;
pub mod types;
