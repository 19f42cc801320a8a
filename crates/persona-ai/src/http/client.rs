//! API client struct, URL building and shared request helpers.

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::ApiError;

use super::config::ApiConfig;

const DETAIL_MAX_CHARS: usize = 100;

/// Client for the persona REST API.
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for a path below `/api`.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.api_url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(check_status(response).await?).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(path);
        debug!(%url, %method, "request");
        let response = self
            .http
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(check_status(response).await?).await
    }

    /// Send a request whose success body is irrelevant.
    pub(crate) async fn send_discarding(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let url = self.api_url(path);
        debug!(%url, %method, "request");
        let response = self
            .http
            .request(method, &url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await.map(|_| ())
    }
}

/// Turn a non-2xx response into `ApiError::Status`.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    Err(ApiError::Status {
        status: status.as_u16(),
        detail: error_detail(&body, reason),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Human-readable detail of an error body.
///
/// A JSON body yields its `error` (then `message`) field, or the HTTP reason
/// phrase when it has neither. Any other body is cut to 100 characters; an
/// empty one also yields the reason phrase.
pub(crate) fn error_detail(body: &str, reason: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        return ["error", "message"]
            .iter()
            .find_map(|key| json[key].as_str().map(str::trim).filter(|t| !t.is_empty()))
            .unwrap_or(reason)
            .to_string();
    }

    let body = body.trim();
    if body.is_empty() {
        return reason.to_string();
    }
    if body.chars().count() > DETAIL_MAX_CHARS {
        let cut: String = body.chars().take(DETAIL_MAX_CHARS).collect();
        return format!("{cut}...");
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_without_double_slash() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.api_url("/chat"), "http://localhost:8000/api/chat");
        assert_eq!(client.api_url("/memory/3"), "http://localhost:8000/api/memory/3");
    }

    #[test]
    fn detail_prefers_json_error_field() {
        let body = r#"{"error":"Trial prompt limit (100) reached.","responseText":null}"#;
        assert_eq!(
            error_detail(body, "Forbidden"),
            "Trial prompt limit (100) reached."
        );
    }

    #[test]
    fn detail_falls_back_to_message_field() {
        let body = r#"{"message":"Model identifier cannot be empty."}"#;
        assert_eq!(
            error_detail(body, "Bad Request"),
            "Model identifier cannot be empty."
        );
    }

    #[test]
    fn detail_truncates_plain_text() {
        let body = "x".repeat(150);
        let detail = error_detail(&body, "Internal Server Error");
        assert_eq!(detail.len(), 103);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn detail_keeps_short_plain_text() {
        assert_eq!(error_detail("upstream down", "Bad Gateway"), "upstream down");
    }

    #[test]
    fn detail_uses_reason_for_empty_body() {
        assert_eq!(error_detail("", "Service Unavailable"), "Service Unavailable");
    }

    #[test]
    fn json_without_error_field_uses_reason() {
        assert_eq!(error_detail("{}", "Bad Gateway"), "Bad Gateway");
        assert_eq!(
            error_detail(r#"{"status":500,"path":"/api/chat"}"#, "Internal Server Error"),
            "Internal Server Error"
        );
        assert_eq!(error_detail(r#"{"error":"  "}"#, "Forbidden"), "Forbidden");
    }
}
