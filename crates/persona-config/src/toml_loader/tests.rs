//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_persona_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        persona_common::ConfigError::FileNotFound(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[backend]
base_url = "https://persona.example.com"

[session]
max_history_length = 40
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.backend.base_url, "https://persona.example.com");
    assert_eq!(config.session.max_history_length, 40);
    // Defaults preserved
    assert_eq!(config.backend.connect_timeout_secs, 10);
    assert_eq!(config.session.max_attachment_bytes, 5 * 1024 * 1024);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, persona_common::ConfigError::ParseError(_)));
}

#[test]
fn out_of_range_values_are_loaded_as_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[session]\nmax_history_length = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.max_history_length, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persona").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.max_history_length, 20);
    assert_eq!(config.backend.base_url, "http://localhost:8000");
}

#[test]
fn template_mentions_every_section() {
    let template = super::template::default_config_toml();
    for section in ["[backend]", "[session]", "[persona]", "[logging]"] {
        assert!(template.contains(section), "missing {section}");
    }
}

#[test]
fn existing_config_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[session]\nmax_history_length = 40\n").unwrap();

    create_default_config(&path).unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.max_history_length, 40);
}

#[test]
fn config_path_is_nested_under_app_dir() {
    let path = super::paths::config_path_in(Path::new("/home/u/.config"));
    assert_eq!(path, Path::new("/home/u/.config/persona/config.toml"));
}

#[test]
fn default_config_path_ends_with_persona_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("persona/config.toml"));
    }
}
