//! Chat-completion provider seam and an OpenAI-compatible HTTP client.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
    pub model: Option<String>,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse, LlmError>;

    fn provider_name(&self) -> &str;
}

/// Request parameters sent with every completion.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub endpoint: String,
    pub api_key: SecretString,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmSettings {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: 1500,
        }
    }
}

pub struct OpenAiChatClient {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl OpenAiChatClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self { http: reqwest::Client::new(), settings }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

/// Pull `choices[0].message.content` out of a completion body.
pub fn extract_content(body: &JsonValue) -> Result<LlmResponse, LlmError> {
    let message = body
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .ok_or_else(|| LlmError::InvalidResponse("Invalid response structure from OpenAI API".into()))?;
    Ok(LlmResponse {
        content: message
            .get("content")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string(),
        model: body.get("model").and_then(JsonValue::as_str).map(str::to_string),
    })
}

#[async_trait]
impl LlmProvider for OpenAiChatClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse, LlmError> {
        let payload = json!({
            "model": self.settings.model,
            "messages": messages,
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        });

        let resp = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(self.settings.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = resp.status();
        let body: JsonValue = resp
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("unreadable completion body: {e}")))?;

        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(JsonValue::as_str)
                .unwrap_or("request failed")
                .to_string();
            return Err(LlmError::Api { status: status.as_u16(), message });
        }

        extract_content(&body)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice() {
        let body = json!({
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "role": "assistant", "content": "## Stock\nAll good" } }]
        });
        let r = extract_content(&body).unwrap();
        assert_eq!(r.content, "## Stock\nAll good");
        assert_eq!(r.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn missing_message_is_invalid_structure() {
        for body in [json!({}), json!({ "choices": [] }), json!({ "choices": [{}] })] {
            let err = extract_content(&body).unwrap_err();
            assert_eq!(err.to_string(), "Invalid response structure from OpenAI API");
        }
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let v = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(v, json!({ "role": "system", "content": "hi" }));
    }

    #[test]
    fn default_settings() {
        let s = LlmSettings::new(SecretString::new("sk-test".into()));
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.max_tokens, 1500);
        assert!((s.temperature - 0.2).abs() < f32::EPSILON);
    }
}
