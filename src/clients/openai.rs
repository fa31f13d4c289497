use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{OpenAiSettings, Timeouts};
use crate::error::{AppError, Result};

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2000;

/// The single outbound seam. Implemented by [`OpenAiClient`] and by test doubles.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Returns the first choice's message content.
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest) -> Result<String>;
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage { role: ChatRole::System, content: system.into() },
                ChatMessage { role: ChatRole::User, content: user.into() },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

pub struct OpenAiClient {
    base_url: String,
    timeouts: Timeouts,
}

impl OpenAiClient {
    pub fn new(settings: &OpenAiSettings) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeouts: settings.timeouts,
        }
    }

    fn http(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(self.timeouts.connect_secs))
            .build()
            .map_err(|e| AppError::Other(anyhow::Error::new(e).context("building HTTP client")))
    }
}

#[async_trait]
impl ChatCompleter for OpenAiClient {
    async fn complete(&self, api_key: &str, request: &ChatCompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http()?
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        if !status.is_success() {
            let message = parse_error_message(&text).inspect_err(|_| {
                tracing::error!(status = status.as_u16(), payload = %text, "OpenAI API error");
            })?;
            return Err(AppError::Upstream { status: status.as_u16(), message, body: text });
        }
        parse_completion(&text)
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub fn parse_completion(text: &str) -> Result<String> {
    let parsed: CompletionResponse =
        serde_json::from_str(text).map_err(|e| AppError::UpstreamParse(e.to_string()))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::UpstreamParse("no choices in response".into()))?;
    choice
        .message
        .content
        .ok_or_else(|| AppError::UpstreamParse("first choice has no message content".into()))
}

/// `error.message` from a provider error payload. A payload that is not JSON
/// (or is JSON `null`) is a parse failure; JSON without a non-empty message is `None`.
pub fn parse_error_message(text: &str) -> Result<Option<String>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| AppError::UpstreamParse(e.to_string()))?;
    if value.is_null() {
        return Err(AppError::UpstreamParse("error payload is null".into()));
    }
    Ok(value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string))
}
