//! Instruction and memory endpoints.

use reqwest::Method;

use crate::records::{Instruction, MemoryFact};
use crate::ApiError;

use super::client::ApiClient;

fn non_blank<'a>(text: &'a str, what: &str) -> Result<&'a str, ApiError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(text)
}

/// Memory write body. The older backend reads `fact_text`, so both spellings are sent.
fn fact_body(id: Option<i64>, text: &str) -> serde_json::Value {
    let mut body = serde_json::json!({ "factText": text, "fact_text": text });
    if let Some(id) = id {
        body["id"] = id.into();
    }
    body
}

impl ApiClient {
    /// Visible instructions (`GET /api/instructions`).
    pub async fn list_instructions(&self) -> Result<Vec<Instruction>, ApiError> {
        self.get_json("/instructions").await
    }

    /// Add a visible instruction and return it with its assigned id.
    pub async fn add_instruction(&self, text: &str) -> Result<Instruction, ApiError> {
        let text = non_blank(text, "instruction text")?;
        self.send_json(
            Method::POST,
            "/instructions",
            &serde_json::json!({ "instructionText": text }),
        )
        .await
    }

    pub async fn delete_instruction(&self, id: i64) -> Result<(), ApiError> {
        self.send_discarding(Method::DELETE, &format!("/instructions/{id}"))
            .await
    }

    /// All stored memory facts (`GET /api/memory`).
    pub async fn list_memory(&self) -> Result<Vec<MemoryFact>, ApiError> {
        self.get_json("/memory").await
    }

    pub async fn add_memory(&self, text: &str) -> Result<MemoryFact, ApiError> {
        let text = non_blank(text, "fact text")?;
        self.send_json(Method::POST, "/memory", &fact_body(None, text))
            .await
    }

    pub async fn update_memory(&self, id: i64, text: &str) -> Result<MemoryFact, ApiError> {
        let text = non_blank(text, "fact text")?;
        self.send_json(Method::PUT, &format!("/memory/{id}"), &fact_body(Some(id), text))
            .await
    }

    pub async fn delete_memory(&self, id: i64) -> Result<(), ApiError> {
        self.send_discarding(Method::DELETE, &format!("/memory/{id}"))
            .await
    }
}
