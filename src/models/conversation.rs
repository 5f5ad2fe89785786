#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::models::{Message, Sender};

/// The ordered message history plus the loading flag. Messages are only
/// ever appended; the whole state is dropped on session reset.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    is_loading: bool,
}

impl ConversationState {
    /// A conversation seeded with the assistant greeting. An empty greeting
    /// starts with no messages.
    pub fn new_hello(greeting: &str) -> Self {
        let mut state = Self::default();
        if !greeting.is_empty() {
            state.append_message(Sender::Assistant, greeting);
        }
        state
    }

    pub fn append_message(&mut self, sender: Sender, text: impl Into<String>) {
        self.push(Message::new(sender, text));
    }

    pub fn push(&mut self, message: Message) {
        log::trace!(
            "appending {} message {} ({} bytes)",
            message.sender(),
            message.id(),
            message.text().len()
        );
        self.messages.push(message);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
