//! Wire records exchanged with the persona REST API.
//!
//! The server speaks camelCase; an older backend emits snake_case for the
//! text fields, which is accepted on input.

use persona_common::InlineData;
use serde::{Deserialize, Serialize};

/// A training instruction shown to the persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub id: i64,
    #[serde(alias = "instruction_text")]
    pub instruction_text: String,
}

/// A remembered fact about the persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryFact {
    pub id: i64,
    #[serde(alias = "fact_text")]
    pub fact_text: String,
}

/// An entry of the model picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ModelInfo {
    /// `"<name> (<id>)"` when a display name exists, otherwise the id.
    pub fn label(&self) -> String {
        match self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => format!("{name} ({})", self.id),
            None => self.id.clone(),
        }
    }
}

/// Body of a 2xx chat response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatReply {
    pub response_text: Option<String>,
    pub image_data: Option<InlineData>,
    pub error: Option<String>,
}

impl ChatReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The trimmed reply text, if there is any.
    pub fn usable_text(&self) -> Option<&str> {
        self.response_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// The server-reported error, if non-blank.
    pub fn reported_error(&self) -> Option<&str> {
        self.error.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}
