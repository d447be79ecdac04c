//! `logihub-assistant`
//!
//! **Responsibility:** answer free-text questions about the warehouse.
//!
//! Two paths:
//! - a keyword-driven responder that fills canned templates with counts from
//!   the current data (always available),
//! - a proxy that forwards the prompt plus the data as JSON to a
//!   chat-completion API behind the [`LlmProvider`] trait.
//!
//! The assistant reads data; it never mutates it.

pub mod assistant;
pub mod context;
pub mod error;
pub mod llm;
pub mod proxy;
pub mod rules;

pub use assistant::{AnswerSource, AskOutcome, AskRequest, Assistant};
pub use context::WarehouseData;
pub use error::AssistantError;
pub use llm::{ChatMessage, ChatRole, LlmError, LlmProvider, LlmResponse, LlmSettings, OpenAiChatClient};
pub use proxy::{AssistantProxy, ProxyRequest, ProxyResponse, SYSTEM_PROMPT};
pub use rules::{RuleAnswer, RuleResponder, Topic};
