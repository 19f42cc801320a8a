//! Session types and concurrency guards.

use std::sync::atomic::{AtomicBool, Ordering};

use persona_common::defaults::{MAX_ATTACHMENT_BYTES, MAX_HISTORY_LENGTH};
use persona_common::TurnId;

use crate::ApiError;

use super::manager::ConversationSession;

const TRIAL_LIMIT_MARKER: &str = "Trial prompt limit";

/// Why a turn or an attachment was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("Another message is still being sent")]
    Busy,
    #[error("File \"{name}\" is {size} bytes, larger than the {limit} byte limit")]
    AttachmentTooLarge { name: String, size: u64, limit: u64 },
    #[error("Could not read \"{name}\": {reason}")]
    AttachmentRead { name: String, reason: String },
    #[error("Trial limit reached: {detail}")]
    TrialLimit { detail: String },
    #[error("Error {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("Received an empty response from the server.")]
    EmptyResponse,
    #[error("Network error: {0}")]
    Transport(String),
}

impl TurnError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::TrialLimit { .. } => "You've reached the free trial limit. \
                 Enter your own API key to keep chatting."
                .to_string(),
            Self::AttachmentTooLarge { name, limit, .. } => format!(
                "File \"{name}\" is too large. Maximum size is {}.",
                human_size(*limit)
            ),
            Self::Transport(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for TurnError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, detail }
                if status == 403 && detail.contains(TRIAL_LIMIT_MARKER) =>
            {
                Self::TrialLimit { detail }
            }
            ApiError::Status { status, detail } => Self::Rejected { status, detail },
            ApiError::Parse(_) => Self::EmptyResponse,
            ApiError::Network(msg) | ApiError::InvalidInput(msg) => Self::Transport(msg),
        }
    }
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} bytes")
    }
}

/// Result of a `submit_turn` call that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing to send: blank text and no pending attachment.
    Ignored,
    Replied { turn_id: TurnId, text: String },
}

impl TurnOutcome {
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Replied { text, .. } => Some(text),
            Self::Ignored => None,
        }
    }
}

/// Limits a session enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub max_history_length: usize,
    pub max_attachment_bytes: u64,
    pub event_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_history_length: MAX_HISTORY_LENGTH,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            event_capacity: 64,
        }
    }
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the turn future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Returns `Err` if a turn is in flight.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, TurnError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(TurnError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Takes a turn's user message back out of the history when dropped armed,
/// which covers both a failed exchange and an abandoned turn future.
pub(crate) struct RollbackGuard<'a> {
    session: &'a ConversationSession,
    seq: u64,
    armed: bool,
}

impl<'a> RollbackGuard<'a> {
    pub(crate) fn new(session: &'a ConversationSession, seq: u64) -> Self {
        Self {
            session,
            seq,
            armed: true,
        }
    }

    /// Keep the user message; returns its sequence number.
    pub(crate) fn disarm(mut self) -> u64 {
        self.armed = false;
        self.seq
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.session.state().history.remove(self.seq);
        }
    }
}
