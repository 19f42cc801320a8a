//! Full configuration validation.
//!
//! Each section pushes its problems into a shared list; the orchestrator
//! folds them into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::AppConfig;
use helpers::validate_range;
use persona_common::ConfigError;

const MAX_ATTACHMENT_CEILING: u64 = 64 * 1024 * 1024;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_backend(&mut errors, config);
    validate_session(&mut errors, config);
    validate_persona(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Problem with a backend base URL, if any.
pub fn base_url_error(url: &str) -> Option<String> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return None;
    }
    Some(format!(
        "backend.base_url = {url:?} must start with http:// or https://"
    ))
}

fn validate_backend(errors: &mut Vec<String>, config: &AppConfig) {
    errors.extend(base_url_error(&config.backend.base_url));
    validate_range(
        errors,
        "backend.connect_timeout_secs",
        config.backend.connect_timeout_secs,
        1,
        300,
    );
}

fn validate_session(errors: &mut Vec<String>, config: &AppConfig) {
    validate_range(
        errors,
        "session.max_history_length",
        config.session.max_history_length,
        2,
        1000,
    );
    validate_range(
        errors,
        "session.max_attachment_bytes",
        config.session.max_attachment_bytes,
        1,
        MAX_ATTACHMENT_CEILING,
    );
    validate_range(
        errors,
        "session.event_capacity",
        config.session.event_capacity,
        1,
        4096,
    );
}

fn validate_persona(errors: &mut Vec<String>, config: &AppConfig) {
    if config.persona.preamble.trim().is_empty() {
        errors.push("persona.preamble must not be empty".into());
    }
}
