//! Pending attachment lifecycle.

use std::path::Path;

use base64::Engine;
use persona_common::{Attachment, Event};
use tracing::{info, warn};

use super::manager::ConversationSession;
use super::types::TurnError;

impl ConversationSession {
    /// Stage a file for the next turn, replacing any file staged before.
    ///
    /// The size limit is checked against the file metadata before reading.
    /// On error the pending attachment is left as it was.
    pub async fn attach_file(&self, path: impl AsRef<Path>) -> Result<(), TurnError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| self.rejected(read_error(&name, e)))?;
        if !metadata.is_file() {
            return Err(self.rejected(TurnError::AttachmentRead {
                name,
                reason: "not a regular file".into(),
            }));
        }
        self.check_size(&name, metadata.len())?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| self.rejected(read_error(&name, e)))?;
        // The file may have grown since the metadata call.
        self.check_size(&name, bytes.len() as u64)?;

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        self.store(name, mime_type, &bytes);
        Ok(())
    }

    /// Stage in-memory content for the next turn, with the same size limit as files.
    pub fn attach_bytes(
        &self,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Result<(), TurnError> {
        let name = name.into();
        self.check_size(&name, bytes.len() as u64)?;
        self.store(name, mime_type.into(), bytes);
        Ok(())
    }

    /// Drop the pending attachment. Returns whether there was one.
    pub fn clear_attachment(&self) -> bool {
        let removed = self.state().pending.take().is_some();
        if removed {
            self.publish(Event::AttachmentCleared);
        }
        removed
    }

    pub fn pending_attachment(&self) -> Option<Attachment> {
        self.state().pending.clone()
    }

    fn check_size(&self, name: &str, size: u64) -> Result<(), TurnError> {
        let limit = self.options.max_attachment_bytes;
        if size > limit {
            return Err(self.rejected(TurnError::AttachmentTooLarge {
                name: name.to_string(),
                size,
                limit,
            }));
        }
        Ok(())
    }

    fn store(&self, name: String, mime_type: String, bytes: &[u8]) {
        let attachment = Attachment {
            name: name.clone(),
            mime_type: mime_type.clone(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        };
        let replaced = self.state().pending.replace(attachment).is_some();
        info!(session = %self.id, %name, %mime_type, size = bytes.len(), replaced, "attachment staged");
        self.publish(Event::AttachmentSet {
            name,
            mime_type,
            size: bytes.len(),
        });
    }

    fn rejected(&self, err: TurnError) -> TurnError {
        let name = match &err {
            TurnError::AttachmentTooLarge { name, .. } | TurnError::AttachmentRead { name, .. } => {
                name.clone()
            }
            _ => String::new(),
        };
        warn!(session = %self.id, %name, "attachment rejected: {err}");
        self.publish(Event::AttachmentRejected {
            name,
            reason: err.user_message(),
        });
        err
    }
}

fn read_error(name: &str, err: std::io::Error) -> TurnError {
    TurnError::AttachmentRead {
        name: name.to_string(),
        reason: err.to_string(),
    }
}
