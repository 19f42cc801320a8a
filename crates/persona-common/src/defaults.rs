//! Built-in limits and texts shared by the config schema and the session.

/// Messages kept in a conversation once a turn settles.
pub const MAX_HISTORY_LENGTH: usize = 20;

/// Largest attachment accepted before any read or upload (5 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Persona text that opens every system prompt.
pub const DEFAULT_PREAMBLE: &str = "You are an AI impersonating Luis Garcia. Respond naturally based on the following instructions and conversation history. Stay in character. NEVER mention you are an AI.";
