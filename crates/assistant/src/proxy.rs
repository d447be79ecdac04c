//! The assistant function: prompt + warehouse data in, model text out.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::AssistantError;
use crate::llm::{ChatMessage, LlmProvider};

pub const SYSTEM_PROMPT: &str = "You are a warehouse management AI assistant specializing in data analysis and visualization.
You help warehouse managers understand their data and generate insights.
When asked about data, you'll analyze the provided warehouse data and suggest visualizations.
Always be specific about what metrics would be most helpful to visualize.
Make sure to utilize the most recent data - check the \"_metadata.refreshed_at\" timestamp to confirm when data was last updated.
Format your responses in markdown, including suggested chart configurations using Recharts syntax when appropriate.
The data will be provided in the user's message.";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub data: JsonValue,
    /// When the caller last refreshed `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyResponse {
    pub response: String,
    pub timestamp: String,
}

#[derive(Clone)]
pub struct AssistantProxy {
    provider: Arc<dyn LlmProvider>,
}

impl AssistantProxy {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Forward the prompt as given; a blank prompt is the model's to answer.
    pub async fn handle(&self, request: ProxyRequest, now: DateTime<Utc>) -> Result<ProxyResponse, AssistantError> {
        tracing::info!(
            data_timestamp = request.timestamp.as_deref().unwrap_or("unknown"),
            provider = self.provider.provider_name(),
            "assistant request received"
        );

        let context = with_metadata(request.data, request.timestamp.as_deref(), now)?;
        let context = serde_json::to_string(&context).map_err(|e| AssistantError::InvalidData(e.to_string()))?;

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Here is my warehouse data: {context}\n\nMy request: {}",
                request.prompt
            )),
        ];

        let reply = self.provider.chat_completion(messages).await?;
        Ok(ProxyResponse { response: reply.content, timestamp: rfc3339(now) })
    }
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `data` with `_metadata { refreshed_at, request_time }` added.
/// `null` data reads as an empty object; other non-objects are rejected.
pub fn with_metadata(
    data: JsonValue,
    refreshed_at: Option<&str>,
    now: DateTime<Utc>,
) -> Result<JsonValue, AssistantError> {
    let mut object = match data {
        JsonValue::Object(map) => map,
        JsonValue::Null => Map::new(),
        other => {
            return Err(AssistantError::InvalidData(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )));
        }
    };

    let mut metadata = Map::new();
    if let Some(ts) = refreshed_at {
        metadata.insert("refreshed_at".into(), JsonValue::String(ts.to_string()));
    }
    metadata.insert("request_time".into(), JsonValue::String(rfc3339(now)));
    object.insert("_metadata".into(), JsonValue::Object(metadata));
    Ok(JsonValue::Object(object))
}

fn kind_of(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
