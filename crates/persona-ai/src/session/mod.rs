//! Conversation session management.
//!
//! A `ConversationSession` owns the bounded history and the pending
//! attachment, runs one turn at a time against a `ChatBackend`, and
//! announces every state change on its `EventBus`.

mod attachment;
mod chat;
mod history;
mod manager;
mod types;


pub use history::ConversationHistory;
pub use manager::ConversationSession;
pub use types::{SessionOptions, TurnError, TurnOutcome};
