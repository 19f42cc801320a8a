//! API client configuration.

use std::time::Duration;

use persona_common::defaults::DEFAULT_BASE_URL;

/// Where the persona API lives and how to connect to it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Only connecting is bounded; a chat reply may take as long as the model needs.
    pub connect_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
