//! # Conversation
//!
//! Bounded multi-turn context for chat sessions.
//!
//! - [`TurnBuffer`] – ordered turns for one session, capped at `2 × window`, oldest evicted first
//! - [`HistoryStore`] – owned map of session id → buffer, one lock per session
//! - [`ConversationManager`] – runs one exchange (render → generate → commit) under the session lock
//!
//! The history is a working-set cache for prompt construction only. It is never persisted and
//! never rebuilt from the durable conversation log.

mod buffer;
mod error;
mod manager;
mod store;

pub use buffer::TurnBuffer;
pub use error::ConversationError;
pub use manager::{ConversationManager, Exchange};
pub use store::{HistoryStore, SessionHandle};

/// Session (chat) identifier.
pub type SessionId = i64;

/// Default number of exchanges retained per session.
pub const DEFAULT_WINDOW: usize = 10;

/// How prompts are built from history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    /// Preamble + rendered history + new message.
    #[default]
    HistoryAware,
    /// The new message alone; history is still recorded.
    Stateless,
}
