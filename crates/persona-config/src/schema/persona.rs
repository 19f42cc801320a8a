use persona_common::defaults::DEFAULT_PREAMBLE;
use serde::{Deserialize, Serialize};

/// Persona text that opens every system prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub preamble: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.into(),
        }
    }
}
