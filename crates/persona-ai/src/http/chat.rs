//! `ChatBackend` and `InstructionSource` implementations for `ApiClient`.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::records::{ChatReply, Instruction};
use crate::{ApiError, ChatBackend, InstructionSource, Message};

use super::client::{check_status, ApiClient};

/// Build the JSON request body for `POST /api/chat`.
pub(crate) fn build_chat_body(history: &[Message], system_prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": history,
        "systemInstruction": {
            "role": "system",
            "parts": [{ "text": system_prompt }]
        }
    })
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn send(&self, history: &[Message], system_prompt: &str) -> Result<ChatReply, ApiError> {
        let body = build_chat_body(history, system_prompt);
        let url = self.api_url("/chat");

        debug!(messages = history.len(), prompt_chars = system_prompt.len(), "chat request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let response = check_status(response).await?;

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        // A 2xx that only carries an error is still a rejection.
        if reply.usable_text().is_none() {
            if let Some(error) = reply.reported_error() {
                return Err(ApiError::Status {
                    status,
                    detail: error.to_string(),
                });
            }
        }

        Ok(reply)
    }
}

#[async_trait]
impl InstructionSource for ApiClient {
    async fn fetch_instructions(&self) -> Vec<Instruction> {
        match self.list_instructions().await {
            Ok(instructions) => instructions,
            Err(e) => {
                warn!("failed to fetch instructions, using preamble only: {e}");
                Vec::new()
            }
        }
    }
}
