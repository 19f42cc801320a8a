//! Model selection and API key endpoints under `/api/chat`.

use reqwest::Method;
use serde::Deserialize;
use tracing::info;

use crate::records::ModelInfo;
use crate::ApiError;

use super::client::ApiClient;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentModel {
    current_model: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelUpdated {
    new_model: String,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

impl ApiClient {
    /// Model used for this session, or the server default.
    pub async fn current_model(&self) -> Result<String, ApiError> {
        let body: CurrentModel = self.get_json("/chat/model").await?;
        Ok(body.current_model)
    }

    /// Select the model for this session; returns the id the server stored.
    pub async fn set_model(&self, model_id: &str) -> Result<String, ApiError> {
        let model_id = model_id.trim();
        if model_id.is_empty() {
            return Err(ApiError::InvalidInput(
                "model identifier cannot be empty".into(),
            ));
        }
        let body: ModelUpdated = self
            .send_json(
                Method::POST,
                "/chat/model",
                &serde_json::json!({ "model": model_id }),
            )
            .await?;
        info!(model = %body.new_model, "model selected");
        Ok(body.new_model)
    }

    /// Every model the server can route to.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        self.get_json("/chat/debug/models").await
    }

    /// Hand the caller's own key to the server for this session.
    ///
    /// A blank key clears any key stored earlier.
    pub async fn save_api_key(&self, api_key: &str) -> Result<String, ApiError> {
        let body: MessageBody = self
            .send_json(
                Method::POST,
                "/chat/save-key",
                &serde_json::json!({ "apiKey": api_key.trim() }),
            )
            .await?;
        Ok(body.message)
    }
}
