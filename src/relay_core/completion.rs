use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::types::ChatMessage;

/// Output budget for every completion request.
const MAX_COMPLETION_TOKENS: u32 = 150;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion api error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion response contained no choices")]
    NoChoices,
}

/// Client for an OpenAI-style chat-completion endpoint.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

impl CompletionClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> CompletionClient {
        CompletionClient {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Sends the conversation upstream and returns the first choice's
    /// message. Non-2xx responses surface the status and raw body.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatMessage, CompletionError> {
        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        debug!(%endpoint, count = messages.len(), "requesting completion");

        let response = self
            .http
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&CompletionRequest {
                messages,
                max_tokens: MAX_COMPLETION_TOKENS,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: CompletionResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(CompletionError::NoChoices)
    }
}
