use std::path::PathBuf;

use clap::Parser;

/// persona: chat with an AI persona from the terminal.
#[derive(Parser, Debug)]
#[command(name = "persona", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log filter override (e.g. debug, or persona_ai=trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
