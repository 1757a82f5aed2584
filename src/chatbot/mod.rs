//! Scripted chatbot — keyword-matched canned replies for the support widget.
//!
//! Entirely local: no network, no persistence, no error paths. The responder
//! is a pure lookup over a static knowledge table; the session just keeps the
//! in-memory transcript for the active widget.

pub mod knowledge;
pub mod responder;
pub mod richtext;
pub mod session;

pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use responder::{ChatRole, Responder, ELABORATE_REPLY, FALLBACK_REPLY, ON_BEHALF_PREFIX};
pub use richtext::{RichText, Run};
pub use session::{ChatMessage, ChatSession, Sender};
