//! HTTP client for the chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;

use crate::messages::{ChatMessage, ChatRequest, ChatResponse};
use crate::provider::{CompletionError, CompletionProvider, CompletionRequest};

/// Error bodies longer than this are truncated before being logged.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Connection settings for the completion API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Bearer key. `None` disables generation.
    pub api_key: Option<String>,
    pub model: String,
    /// Upper bound on a single completion round-trip.
    pub timeout: Duration,
    pub max_tokens: Option<u32>,
}

/// [`CompletionProvider`] speaking the OpenAI chat-completions protocol.
pub struct ChatCompletionsApi {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ChatCompletionsApi {
    /// Build a client with the configured timeout.
    pub fn new(config: LlmConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
        let user = match &request.image_url {
            Some(url) => ChatMessage::user_with_image(request.user.clone(), url.clone()),
            None => ChatMessage::user(request.user.clone()),
        };
        vec![ChatMessage::system(request.system.clone()), user]
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsApi {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(CompletionError::NotConfigured)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: Self::build_messages(request),
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            has_image = request.image_url.is_some(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(classify_request_error)?;
        parsed
            .first_content()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyCompletion)
    }
}

fn classify_request_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Request(err)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            base_url: "http://127.0.0.1:9/v1/".to_string(),
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(1),
            max_tokens: None,
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "persona".to_string(),
            user: "topic".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let api = ChatCompletionsApi::new(config(Some("key"))).unwrap();
        assert_eq!(api.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn image_goes_on_the_user_turn() {
        let mut req = request();
        req.image_url = Some("data:image/png;base64,AAAA".to_string());
        let messages = ChatCompletionsApi::build_messages(&req);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system("persona"));
        assert_eq!(
            messages[1],
            ChatMessage::user_with_image("topic", "data:image/png;base64,AAAA")
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let api = ChatCompletionsApi::new(config(None)).unwrap();
        let result = api.complete(&request()).await;
        assert!(matches!(result, Err(CompletionError::NotConfigured)));

        let api = ChatCompletionsApi::new(config(Some(""))).unwrap();
        let result = api.complete(&request()).await;
        assert!(matches!(result, Err(CompletionError::NotConfigured)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("éééé", 2), "éé...");
    }

    #[test]
    fn api_error_display() {
        let err = CompletionError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "Completion API error (429): rate limited");
    }
}
