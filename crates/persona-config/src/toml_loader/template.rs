//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Persona chat client configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[backend]
# base_url = "http://localhost:8000"   # PERSONA_BASE_URL overrides this
# connect_timeout_secs = 10            # 1-300

[session]
# max_history_length = 20              # 2-1000, messages kept after each turn
# max_attachment_bytes = 5242880       # 5 MiB
# event_capacity = 64                  # 1-4096

[persona]
# preamble = "You are an AI impersonating Luis Garcia. Respond naturally based on the following instructions and conversation history. Stay in character. NEVER mention you are an AI."

[logging]
# level = "INFO"                       # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
