//! Append-only chat log
//!
//! The simulation posts system lines here; the page copies new lines into
//! the chat box using a cursor so each line is shown once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatAuthor {
    System,
    Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn system(&mut self, text: impl Into<String>) {
        self.push(ChatAuthor::System, text.into());
    }

    pub fn player(&mut self, text: impl Into<String>) {
        self.push(ChatAuthor::Player, text.into());
    }

    fn push(&mut self, author: ChatAuthor, text: String) {
        log::debug!("chat[{:?}]: {}", author, text);
        self.messages.push(ChatMessage { author, text });
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Messages posted since `cursor`; a cursor past the end yields nothing
    pub fn since(&self, cursor: usize) -> &[ChatMessage] {
        self.messages.get(cursor..).unwrap_or(&[])
    }
}
