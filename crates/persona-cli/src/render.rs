//! Terminal rendering of session events and API listings.

use persona_ai::{Instruction, MemoryFact, Message, ProviderGroup, Role};
use persona_common::Event;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

/// The line to print for `event`, if it is user-visible.
pub fn render_event(event: &Event) -> Option<String> {
    match event {
        Event::AttachmentSet {
            name,
            mime_type,
            size,
        } => Some(format!(
            "[attached] {name} ({mime_type}, {})",
            format_size(*size as u64)
        )),
        Event::AttachmentRejected { reason, .. } => Some(format!("[error] {reason}")),
        Event::TurnStarted { .. } => Some("...".to_string()),
        Event::TurnCompleted { reply, image, .. } => Some(match image {
            Some(mime_type) => format!("persona> {reply} [image: {mime_type}]"),
            None => format!("persona> {reply}"),
        }),
        Event::TurnFailed { message, .. } => Some(format!("[error] {message}")),
        Event::HistoryCleared => Some("[conversation cleared]".to_string()),
        Event::AttachmentCleared | Event::HistoryTrimmed { .. } | Event::Unknown => None,
    }
}

/// Print events until the session goes away.
pub async fn run(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(line) = render_event(&event) {
                    println!("{line}");
                }
            }
            Err(RecvError::Lagged(missed)) => warn!(missed, "renderer fell behind"),
            Err(RecvError::Closed) => break,
        }
    }
}

pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{kb:.1} KB");
    }
    format!("{:.1} MB", kb / 1024.0)
}

pub fn format_history(messages: &[Message]) -> Vec<String> {
    if messages.is_empty() {
        return vec!["(no messages yet)".to_string()];
    }
    messages
        .iter()
        .map(|m| {
            let who = match m.role {
                Role::User => "you",
                Role::Model => "persona",
            };
            let file = if m.has_inline_data() { " [file]" } else { "" };
            format!("{who}> {}{file}", m.text())
        })
        .collect()
}

pub fn format_instructions(instructions: &[Instruction]) -> Vec<String> {
    if instructions.is_empty() {
        return vec!["(no instructions)".to_string()];
    }
    instructions
        .iter()
        .map(|i| format!("{:>4}  {}", i.id, i.instruction_text))
        .collect()
}

pub fn format_memory(facts: &[MemoryFact]) -> Vec<String> {
    if facts.is_empty() {
        return vec!["(nothing remembered)".to_string()];
    }
    facts
        .iter()
        .map(|f| format!("{:>4}  {}", f.id, f.fact_text))
        .collect()
}

/// Provider headings with indented models; `current` is starred.
pub fn format_model_groups(groups: &[ProviderGroup], current: Option<&str>) -> Vec<String> {
    if groups.is_empty() {
        return vec!["(no matching models)".to_string()];
    }
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("{}:", group.provider));
        for model in &group.models {
            let marker = if current == Some(model.id.as_str()) { "*" } else { " " };
            lines.push(format!("  {marker} {}", model.label()));
        }
    }
    lines
}
