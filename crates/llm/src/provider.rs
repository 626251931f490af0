//! The completion provider seam.

use async_trait::async_trait;

/// Errors from a completion provider. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key is configured, so no request can be made.
    #[error("Completion provider is not configured")]
    NotConfigured,

    /// The request did not complete within the configured timeout.
    #[error("Completion request timed out")]
    Timeout,

    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated, for debugging.
        body: String,
    },

    /// The API answered successfully but without any usable text.
    #[error("Completion API returned no content")]
    EmptyCompletion,
}

/// One generation exchange: a system instruction and a user turn, with an
/// optional image attached to the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Image as a URL, typically `data:<mime>;base64,...`.
    pub image_url: Option<String>,
}

/// Something that turns a [`CompletionRequest`] into generated text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run a single completion. Returns the non-empty generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
