use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("completion API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl ChatCompletionRequest {
    /// A request asking for a JSON object response.
    pub fn json(model: impl Into<String>, messages: Vec<ChatMessage>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages,
            temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Text-completion collaborator.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Text of the first choice, or `None` when the service returned no content.
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<String>, CompletionError>;
}

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<String>, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            tracing::warn!("Completion API error {}: {}", status, body);
            return Err(CompletionError::Api { status, body });
        }

        let parsed = response.json::<ChatCompletionResponse>().await?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }
}
