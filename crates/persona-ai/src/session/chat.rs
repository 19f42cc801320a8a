//! The turn state machine.

use persona_common::{Event, Message, TurnId};
use tracing::{debug, info, info_span, warn, Instrument};

use super::manager::ConversationSession;
use super::types::{BusyGuard, RollbackGuard, TurnError, TurnOutcome};

impl ConversationSession {
    /// Send `text` together with the pending attachment and wait for the reply.
    ///
    /// Blank text with nothing attached is ignored. The pending attachment is
    /// consumed whatever the outcome. On failure, or when the returned future is
    /// dropped before the reply arrives, the user message is taken back out of
    /// the history, so a settled history never ends with an unanswered user
    /// message. Only one turn may be in flight; a second call gets
    /// `TurnError::Busy` and changes nothing.
    pub async fn submit_turn(&self, text: &str) -> Result<TurnOutcome, TurnError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let text = text.trim();

        let (user_seq, attachment, history) = {
            let mut state = self.state();
            if text.is_empty() && state.pending.is_none() {
                return Ok(TurnOutcome::Ignored);
            }
            let attachment = state.pending.take();
            let seq = state.history.push(Message::user(text, attachment.as_ref()));
            (seq, attachment, state.history.messages())
        };
        let rollback = RollbackGuard::new(self, user_seq);

        let turn_id = TurnId::new();
        if attachment.is_some() {
            self.publish(Event::AttachmentCleared);
        }
        self.publish(Event::TurnStarted {
            turn_id: turn_id.clone(),
            text: text.to_string(),
            attachment: attachment.map(|a| a.name),
        });

        let span = info_span!("turn", session = %self.id, turn = %turn_id);
        match self.exchange(&history).instrument(span).await {
            Ok((reply, image)) => {
                self.record_reply(rollback, &reply);
                info!(session = %self.id, turn = %turn_id, chars = reply.len(), "turn completed");
                self.publish(Event::TurnCompleted {
                    turn_id: turn_id.clone(),
                    reply: reply.clone(),
                    image,
                });
                Ok(TurnOutcome::Replied {
                    turn_id,
                    text: reply,
                })
            }
            Err(err) => {
                drop(rollback);
                warn!(session = %self.id, turn = %turn_id, "turn failed: {err}");
                self.publish(Event::TurnFailed {
                    turn_id,
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    /// Reply text and the MIME type of any image sent along with it.
    async fn exchange(&self, history: &[Message]) -> Result<(String, Option<String>), TurnError> {
        let instructions = self.instructions.fetch_instructions().await;
        let system_prompt = self.prompt.build(&instructions);
        debug!(
            messages = history.len(),
            instructions = instructions.len(),
            "sending turn"
        );

        let reply = self.backend.send(history, &system_prompt).await?;
        let text = reply
            .usable_text()
            .map(str::to_string)
            .ok_or(TurnError::EmptyResponse)?;
        Ok((text, reply.image_data.map(|image| image.mime_type)))
    }

    /// Append the model reply and enforce the history window.
    fn record_reply(&self, rollback: RollbackGuard<'_>, reply: &str) {
        let user_seq = rollback.disarm();
        let dropped = {
            let mut state = self.state();
            // Cleared while the request was in flight.
            if !state.history.contains(user_seq) {
                debug!(session = %self.id, "history cleared mid-turn, reply not recorded");
                return;
            }
            state.history.push(Message::model(reply));
            state.history.trim_to(self.options.max_history_length)
        };
        if dropped > 0 {
            debug!(session = %self.id, dropped, "history trimmed");
            self.publish(Event::HistoryTrimmed { dropped });
        }
    }
}
