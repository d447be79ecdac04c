use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::WarehouseData;
use crate::error::AssistantError;
use crate::proxy::{AssistantProxy, ProxyRequest};
use crate::rules::{RuleResponder, Topic};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub prompt: String,
    /// Page the widget is open on (`inventory`, `space`, ...).
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Remote,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskOutcome {
    pub response: String,
    pub source: AnswerSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    pub timestamp: String,
}

/// The widget's question flow: remote model when configured, rules otherwise
/// or when the remote call fails.
#[derive(Clone, Default)]
pub struct Assistant {
    rules: RuleResponder,
    remote: Option<AssistantProxy>,
}

impl Assistant {
    pub fn rules_only() -> Self {
        Self::default()
    }

    pub fn with_remote(remote: AssistantProxy) -> Self {
        Self { rules: RuleResponder, remote: Some(remote) }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn ask(
        &self,
        request: AskRequest,
        data: &WarehouseData,
        now: DateTime<Utc>,
    ) -> Result<AskOutcome, AssistantError> {
        if request.prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }

        if let Some(remote) = &self.remote {
            let payload = serde_json::to_value(data).map_err(|e| AssistantError::InvalidData(e.to_string()))?;
            let proxied = remote
                .handle(
                    ProxyRequest {
                        prompt: request.prompt.clone(),
                        data: payload,
                        timestamp: Some(now.to_rfc3339()),
                    },
                    now,
                )
                .await;
            match proxied {
                Ok(reply) => {
                    return Ok(AskOutcome {
                        response: reply.response,
                        source: AnswerSource::Remote,
                        topic: None,
                        timestamp: reply.timestamp,
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "remote assistant failed; answering from rules");
                }
            }
        }

        let answer = self.rules.respond(&request.prompt, request.page.as_deref(), data)?;
        Ok(AskOutcome {
            response: answer.text,
            source: AnswerSource::Rules,
            topic: Some(answer.topic),
            timestamp: now.to_rfc3339(),
        })
    }
}
