//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&AppConfig::default()).is_ok());
}

#[test]
fn catches_non_http_base_url() {
    let mut config = AppConfig::default();
    config.backend.base_url = "ftp://example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.base_url"));
}

#[test]
fn catches_zero_connect_timeout() {
    let mut config = AppConfig::default();
    config.backend.connect_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.connect_timeout_secs"));
}

#[test]
fn catches_history_too_short() {
    let mut config = AppConfig::default();
    config.session.max_history_length = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.max_history_length = 1"));
}

#[test]
fn catches_oversized_attachment_limit() {
    let mut config = AppConfig::default();
    config.session.max_attachment_bytes = 1 << 40;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.max_attachment_bytes"));
}

#[test]
fn catches_blank_preamble() {
    let mut config = AppConfig::default();
    config.persona.preamble = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("persona.preamble"));
}

#[test]
fn reports_every_problem_at_once() {
    let mut config = AppConfig::default();
    config.backend.base_url = String::new();
    config.session.event_capacity = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.base_url"));
    assert!(err.contains("session.event_capacity"));
    assert!(err.contains("; "));
}
