/// LLM Client — the single point of entry for chat-completion gateway calls.
///
/// No other module may call the gateway directly; the relay talks to it
/// through the `CompletionClient` trait so tests can swap in a fake.
///
/// Model: google/gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::chat::ChatMessage;

/// The model used for every completion call.
pub const MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by AI gateway")]
    RateLimited,

    #[error("AI gateway requires payment")]
    PaymentRequired,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            model: MODEL,
            messages,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice, if it carries any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Seam over the external chat-completion API.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest)
        -> Result<CompletionResponse, LlmError>;
}

/// OpenAI-compatible gateway client authenticated with a bearer key.
/// Makes exactly one attempt per call; failures surface to the caller.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GatewayClient {
    pub fn new(endpoint: String, api_key: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .build()
                .context("Failed to build AI gateway HTTP client")?,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl CompletionClient for GatewayClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let completion: CompletionResponse = response.json().await?;
        debug!(
            "Completion call succeeded: {} choice(s)",
            completion.choices.len()
        );
        Ok(completion)
    }
}

/// Maps a non-success gateway status onto the error taxonomy callers branch on.
fn classify_failure(status: StatusCode, body: String) -> LlmError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => LlmError::PaymentRequired,
        _ => LlmError::Api {
            status: status.as_u16(),
            message: body,
        },
    }
}
