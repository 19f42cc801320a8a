//! Conversation engine for the persona chat client.
//!
//! Provides:
//! - `ConversationSession`: history, pending attachment and the turn state machine
//! - `ApiClient`: typed access to the persona REST API (chat, instructions,
//!   memory, model selection, API key hand-off)
//! - System prompt assembly and provider grouping for the model picker

pub mod catalog;
pub mod http;
pub mod prompt;
pub mod records;
pub mod session;

use async_trait::async_trait;

pub use catalog::{group_models, provider_for, ProviderGroup};
pub use http::{ApiClient, ApiConfig};
pub use persona_common::{Attachment, InlineData, Message, Part, Role};
pub use prompt::SystemPromptBuilder;
pub use records::{ChatReply, Instruction, MemoryFact, ModelInfo};
pub use session::{ConversationHistory, ConversationSession, SessionOptions, TurnError, TurnOutcome};

/// The service that turns a conversation into a model reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, history: &[Message], system_prompt: &str) -> Result<ChatReply, ApiError>;
}

/// Supplies the visible instructions that shape the system prompt.
///
/// Implementations swallow their own failures: an unreachable store reads as
/// "no instructions", never as an error.
#[async_trait]
pub trait InstructionSource: Send + Sync {
    async fn fetch_instructions(&self) -> Vec<Instruction>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ApiError> for persona_common::PersonaError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => Self::Network(msg),
            other => Self::Api(other.to_string()),
        }
    }
}
