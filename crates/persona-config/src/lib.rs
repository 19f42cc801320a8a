//! Configuration for the persona chat client.
//!
//! TOML-based, with every section defaulted so an empty or partial file
//! works. Values are validated as a whole after environment overrides.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use persona_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AppConfig, LogLevel};

use persona_common::ConfigError;
use std::path::Path;

/// Environment variable overriding `backend.base_url`.
pub const BASE_URL_ENV: &str = "PERSONA_BASE_URL";

/// Load config from `path`, or from the platform default location when `None`.
///
/// An explicit path that does not exist is an error; the default location is
/// created from the template on first use.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validation::validate(&config)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("{BASE_URL_ENV} overrides backend.base_url");
        config.backend.base_url = url.trim().to_string();
    }
}

/// Point `config` at `url`, checked the same way as a configured base URL.
///
/// Leaves `config` untouched when the URL is rejected.
pub fn override_base_url(config: &mut AppConfig, url: &str) -> Result<(), ConfigError> {
    if let Some(problem) = validation::base_url_error(url) {
        return Err(ConfigError::ValidationError(problem));
    }
    config.backend.base_url = url.trim().to_string();
    Ok(())
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AppConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
