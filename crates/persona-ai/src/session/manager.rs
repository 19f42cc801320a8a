//! Session struct, construction and state accessors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use persona_common::{Attachment, Event, EventBus, Message, SessionId};
use tokio::sync::broadcast;
use tracing::debug;

use crate::prompt::SystemPromptBuilder;
use crate::{ApiClient, ChatBackend, InstructionSource};

use super::history::ConversationHistory;
use super::types::SessionOptions;

/// Mutable part of a session. Never held across an `.await`.
#[derive(Debug, Default)]
pub(super) struct SessionState {
    pub(super) history: ConversationHistory,
    pub(super) pending: Option<Attachment>,
}

/// One chat conversation against a backend.
pub struct ConversationSession {
    pub(super) id: SessionId,
    pub(super) backend: Arc<dyn ChatBackend>,
    pub(super) instructions: Arc<dyn InstructionSource>,
    pub(super) prompt: SystemPromptBuilder,
    pub(super) options: SessionOptions,
    pub(super) state: Mutex<SessionState>,
    pub(super) events: EventBus,
    /// Whether a turn is in flight.
    pub(super) busy: AtomicBool,
}

impl ConversationSession {
    pub fn new(backend: Arc<dyn ChatBackend>, instructions: Arc<dyn InstructionSource>) -> Self {
        let options = SessionOptions::default();
        Self {
            id: SessionId::new(),
            backend,
            instructions,
            prompt: SystemPromptBuilder::default(),
            options,
            state: Mutex::new(SessionState::default()),
            events: EventBus::new(options.event_capacity),
            busy: AtomicBool::new(false),
        }
    }

    /// Session whose chat and instructions both come from `client`.
    pub fn from_client(client: Arc<ApiClient>) -> Self {
        Self::new(client.clone(), client)
    }

    pub fn with_prompt_builder(mut self, prompt: SystemPromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replace the limits. Recreates the event bus, so call before `subscribe`.
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.events = EventBus::new(options.event_capacity.max(1));
        self.options = options;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of the conversation, oldest first.
    pub fn history(&self) -> Vec<Message> {
        self.state().history.messages()
    }

    pub fn history_len(&self) -> usize {
        self.state().history.len()
    }

    /// Forget the conversation. A turn in flight keeps running but its reply
    /// is not recorded.
    pub fn clear_history(&self) {
        let dropped = {
            let mut state = self.state();
            let len = state.history.len();
            state.history.clear();
            len
        };
        debug!(session = %self.id, dropped, "history cleared");
        self.events.publish(Event::HistoryCleared);
    }

    pub(super) fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn publish(&self, event: Event) {
        self.events.publish(event);
    }
}
