/// Model gateway — the single point of entry for generative-backend calls.
///
/// ARCHITECTURAL RULE: no other module may talk to the Groq API directly.
/// All model interactions go through [`ModelGateway`].
///
/// The gateway performs exactly one request per invocation: no internal
/// retries and no caching. Retry-or-fallback policy belongs to the caller.
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GatewayConfig;
use crate::errors::AppError;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Abstraction over a generative-text backend: send a rendered prompt,
/// get raw text back. Carried in the engine as `Arc<dyn ModelGateway>` so
/// tests can substitute a canned backend.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, AppError>;

    /// Identifier reported back to API clients alongside each evaluation.
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client. One blocking round-trip per invoke, bounded
/// by the configured timeout.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    config: GatewayConfig,
}

impl GroqClient {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ModelGateway for GroqClient {
    async fn invoke(&self, prompt: &str) -> Result<String, AppError> {
        let request_body = ChatRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request to model backend failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the API's own message when the error body parses
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::Upstream(format!(
                "model backend returned {status}: {message}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to read model backend response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::Upstream("model backend returned empty content".to_string()))?;

        debug!(bytes = content.len(), "model response received");
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
