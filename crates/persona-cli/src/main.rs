mod cli;
mod commands;
mod render;
mod repl;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use persona_ai::{ApiClient, ApiConfig, ConversationSession, SessionOptions, SystemPromptBuilder};
use persona_config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Logging needs the configured level, so load first and report afterwards.
    let loaded = persona_config::load_config(args.config.as_deref());

    let log_directive = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.filter_directive(),
        (None, Err(_)) => AppConfig::default().logging.level.filter_directive(),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_new(&log_directive).unwrap_or_else(|e| {
            eprintln!("invalid log filter {log_directive:?}: {e}");
            EnvFilter::new("warn")
        }))
        .init();

    tracing::info!("persona v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AppConfig::default()
    });
    if let Some(url) = &args.base_url {
        if let Err(e) = persona_config::override_base_url(&mut config, url) {
            tracing::error!("--base-url rejected: {e}");
            return ExitCode::FAILURE;
        }
    }
    tracing::debug!("effective config: {}", persona_config::config_to_json(&config));

    let api_config = ApiConfig::new(config.backend.base_url.clone()).with_connect_timeout(
        Duration::from_secs(u64::from(config.backend.connect_timeout_secs)),
    );
    let client = match ApiClient::new(api_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to create API client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let session = Arc::new(
        ConversationSession::from_client(client.clone())
            .with_prompt_builder(SystemPromptBuilder::new(config.persona.preamble.clone()))
            .with_options(SessionOptions {
                max_history_length: config.session.max_history_length as usize,
                max_attachment_bytes: config.session.max_attachment_bytes,
                event_capacity: config.session.event_capacity as usize,
            }),
    );
    tracing::info!(session = %session.id(), base_url = %config.backend.base_url, "session ready");

    let renderer = tokio::spawn(render::run(session.subscribe()));

    let result = repl::Repl::new(client, session).run().await;
    renderer.abort();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
