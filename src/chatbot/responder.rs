//! The chatbot responder — deterministic keyword lookup over the knowledge
//! table.
//!
//! Matching is first-match-wins in table order, with the `common` bucket
//! always checked before the role bucket. Agents additionally fall back to
//! the client bucket (prefixed) so they can answer on a client's behalf.

use tracing::debug;

use super::knowledge::{KnowledgeBase, KnowledgeEntry};
use super::richtext::RichText;

/// Reply for messages shorter than two characters after trimming.
pub const ELABORATE_REPLY: &str =
    "Could you elaborate a little? A few more words help me point you to the right service.";

/// Reply when nothing in any bucket matched.
pub const FALLBACK_REPLY: &str = "I didn't catch that. I can help with:\n**Company registration** (Private Limited, Public Limited, LLP, Proprietorship)\n**GST and trademarks**\n**Payments, documents and application status**\nTry asking about one of those.";

/// Prefix applied when an agent query is answered from the client bucket.
pub const ON_BEHALF_PREFIX: &str = "(On behalf of Client): ";

/// The audience a chat message comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    Client,
    Agent,
    Guest,
}

impl ChatRole {
    /// Map a role tag from the outer application. Anything unrecognized is
    /// treated as a guest, which shares the client bucket.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "AGENT" => Self::Agent,
            "CLIENT" => Self::Client,
            _ => Self::Guest,
        }
    }
}

/// Pure message-to-reply lookup. No state, no I/O, no error paths.
pub struct Responder {
    base: KnowledgeBase,
}

impl Responder {
    pub fn new() -> Self {
        Self {
            base: KnowledgeBase::default_rules(),
        }
    }

    /// Use a custom knowledge table (tests, future per-tenant tables).
    pub fn with_knowledge(base: KnowledgeBase) -> Self {
        Self { base }
    }

    /// Produce the reply for a message, structured for rendering.
    pub fn respond(&self, message: &str, role: ChatRole) -> RichText {
        RichText::parse(&self.reply_text(message, role))
    }

    /// Produce the raw reply string (with `**bold**` / `\n` markers).
    pub fn reply_text(&self, message: &str, role: ChatRole) -> String {
        let trimmed = message.trim();
        if trimmed.chars().count() < 2 {
            return ELABORATE_REPLY.to_string();
        }
        let lowered = trimmed.to_lowercase();

        // Role-independent topics always win.
        if let Some(entry) = scan(&self.base.common, &lowered) {
            debug!(bucket = "common", "chatbot rule hit");
            return entry.response.to_string();
        }

        match role {
            ChatRole::Agent => {
                if let Some(entry) = scan(&self.base.agent, &lowered) {
                    debug!(bucket = "agent", "chatbot rule hit");
                    return entry.response.to_string();
                }
                // Agents often ask client questions on a client's behalf.
                if let Some(entry) = scan(&self.base.client, &lowered) {
                    debug!(bucket = "client", fallback = true, "chatbot rule hit");
                    return format!("{ON_BEHALF_PREFIX}{}", entry.response);
                }
            }
            ChatRole::Client | ChatRole::Guest => {
                if let Some(entry) = scan(&self.base.client, &lowered) {
                    debug!(bucket = "client", "chatbot rule hit");
                    return entry.response.to_string();
                }
            }
        }

        debug!("chatbot fallback reply");
        FALLBACK_REPLY.to_string()
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

/// First entry in table order with a keyword contained in the message.
fn scan<'a>(bucket: &'a [KnowledgeEntry], lowered: &str) -> Option<&'a KnowledgeEntry> {
    bucket.iter().find(|entry| entry.matches(lowered))
}
