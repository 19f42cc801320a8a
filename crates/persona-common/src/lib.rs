pub mod defaults;
pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, PersonaError};
pub use events::{Event, EventBus};
pub use id::{new_correlation_id, new_id, SessionId, TurnId};
pub use types::{Attachment, InlineData, Message, Part, Role};

pub type Result<T> = std::result::Result<T, PersonaError>;
