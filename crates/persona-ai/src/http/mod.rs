//! HTTP client for the persona REST API.
//!
//! One `ApiClient` covers every endpoint under `/api`: it implements
//! `ChatBackend` and `InstructionSource` for the session, and exposes the
//! instruction, memory, model and key endpoints directly.

mod chat;
mod client;
mod config;
mod models;
mod stores;

pub use client::ApiClient;
pub use config::ApiConfig;
