use persona_common::defaults::{MAX_ATTACHMENT_BYTES, MAX_HISTORY_LENGTH};
use serde::{Deserialize, Serialize};

/// Conversation session limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Messages kept after a turn settles (valid range: 2-1000).
    pub max_history_length: u32,
    /// Largest file accepted as an attachment, in bytes.
    pub max_attachment_bytes: u64,
    /// Buffered events per subscriber before slow renderers start lagging.
    pub event_capacity: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_history_length: MAX_HISTORY_LENGTH as u32,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            event_capacity: 64,
        }
    }
}
