//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, payload::MessagePayload, user::User};

/// A single inbound event: who sent it, in which chat, and what it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub payload: MessagePayload,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Session id used for history and storage (the chat id).
    pub fn session_id(&self) -> i64 {
        self.chat.id
    }

    /// Free text, if the payload is plain text (not a command).
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            MessagePayload::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Command name and arguments, if the payload is a command.
    pub fn command(&self) -> Option<(&str, &[String])> {
        match &self.payload {
            MessagePayload::Command { name, args } => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }
}
