use thiserror::Error;

use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("prompt is required")]
    EmptyPrompt,

    #[error("invalid data context: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}
