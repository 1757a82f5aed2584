//! In-memory chat transcript for one open widget.

use std::time::Duration;

use super::responder::{ChatRole, Responder};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    System,
}

/// One bubble in the transcript. `text` for system messages is the rendered
/// HTML fragment of the canned reply; ids are monotonic per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
}

/// The active chat session. Lives only as long as the widget is open;
/// nothing is persisted.
pub struct ChatSession {
    role: ChatRole,
    responder: Responder,
    messages: Vec<ChatMessage>,
    next_id: u64,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new(role: ChatRole) -> Self {
        Self {
            role,
            responder: Responder::new(),
            messages: Vec::new(),
            next_id: 1,
            reply_delay: Duration::from_millis(600),
        }
    }

    /// Override the simulated typing delay (zero in tests).
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append the user's message, wait the simulated typing delay, then
    /// append and return the bot reply.
    pub async fn send(&mut self, text: &str) -> &ChatMessage {
        self.push(text.to_string(), Sender::User);

        tokio::time::sleep(self.reply_delay).await;

        let reply = self.responder.respond(text, self.role).to_html();
        self.push(reply, Sender::System);
        let last = self.messages.len() - 1;
        &self.messages[last]
    }

    fn push(&mut self, text: String, sender: Sender) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            text,
            sender,
        });
        self.next_id += 1;
    }
}
