use std::collections::VecDeque;

use persona_common::Message;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    message: Message,
}

/// Chronological conversation history.
///
/// Every appended message gets a sequence number so a failed turn can remove
/// exactly the user message it added, even if other entries moved meanwhile.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    entries: VecDeque<Entry>,
    next_seq: u64,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its sequence number.
    pub fn push(&mut self, message: Message) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_back(Entry { seq, message });
        seq
    }

    /// Remove the entry with sequence number `seq`. Returns it if it was present.
    pub fn remove(&mut self, seq: u64) -> Option<Message> {
        let index = self.entries.iter().position(|e| e.seq == seq)?;
        self.entries.remove(index).map(|e| e.message)
    }

    pub fn contains(&self, seq: u64) -> bool {
        self.entries.iter().any(|e| e.seq == seq)
    }

    /// Drop the oldest entries until at most `max` remain. Returns how many went.
    pub fn trim_to(&mut self, max: usize) -> usize {
        let excess = self.entries.len().saturating_sub(max);
        self.entries.drain(..excess);
        excess
    }

    /// Snapshot of the messages, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every message. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(history: &ConversationHistory) -> Vec<String> {
        history.messages().iter().map(Message::text).collect()
    }

    #[test]
    fn push_assigns_increasing_sequence_numbers() {
        let mut history = ConversationHistory::new();
        let a = history.push(Message::user("a", None));
        let b = history.push(Message::model("b"));
        assert!(b > a);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn remove_by_sequence_leaves_others_in_order() {
        let mut history = ConversationHistory::new();
        history.push(Message::user("one", None));
        let two = history.push(Message::user("two", None));
        history.push(Message::model("three"));

        let removed = history.remove(two).unwrap();
        assert_eq!(removed.text(), "two");
        assert_eq!(texts(&history), ["one", "three"]);
        assert!(history.remove(two).is_none());
    }

    #[test]
    fn trim_drops_oldest_first() {
        let mut history = ConversationHistory::new();
        for i in 0..5 {
            history.push(Message::model(i.to_string()));
        }
        assert_eq!(history.trim_to(3), 2);
        assert_eq!(texts(&history), ["2", "3", "4"]);
        assert_eq!(history.trim_to(3), 0);
    }

    #[test]
    fn cleared_history_does_not_reuse_sequence_numbers() {
        let mut history = ConversationHistory::new();
        let old = history.push(Message::user("x", None));
        history.clear();
        assert!(history.is_empty());
        let new = history.push(Message::user("y", None));
        assert_ne!(old, new);
        assert!(!history.contains(old));
        assert!(history.contains(new));
    }
}
