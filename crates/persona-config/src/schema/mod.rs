//! Configuration schema types for the persona client.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backend;
mod logging;
mod persona;
mod session;

pub use backend::*;
pub use logging::*;
pub use persona::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub persona: PersonaConfig,
    pub logging: LoggingConfig,
}
