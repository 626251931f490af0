//! Client for an OpenAI-compatible chat-completions API.
//!
//! [`CompletionProvider`] is the seam the API server depends on;
//! [`ChatCompletionsApi`] is the HTTP implementation.

pub mod api;
pub mod messages;
pub mod provider;

pub use api::{ChatCompletionsApi, LlmConfig};
pub use provider::{CompletionError, CompletionProvider, CompletionRequest};
