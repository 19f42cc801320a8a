use persona_common::defaults::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Where the persona REST API lives and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the server; `/api/...` paths are appended to it.
    pub base_url: String,
    /// TCP connect timeout in seconds (valid range: 1-300).
    pub connect_timeout_secs: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            connect_timeout_secs: 10,
        }
    }
}
