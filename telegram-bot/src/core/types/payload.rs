//! Inbound payload variants.

use serde::{Deserialize, Serialize};

/// What an inbound message carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePayload {
    /// Free text that is not a command.
    Text(String),
    /// `/name arg1 arg2`; `name` is lowercase without the slash or `@bot` suffix.
    Command { name: String, args: Vec<String> },
    /// A shared contact.
    Contact { phone_number: String },
    /// A photo; `file_id` refers to the largest available size.
    Photo { file_id: String },
    /// A document attachment.
    Document {
        file_id: String,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
    /// Anything else (stickers, voice, ...).
    Unsupported,
}

impl MessagePayload {
    /// Parses text into a command when it starts with `/`, else plain text.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim_start();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return MessagePayload::Text(text.to_string());
        };
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return MessagePayload::Text(text.to_string());
        }
        let mut parts = rest.split_whitespace();
        let head = parts.next().unwrap_or(rest);
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        let args = parts.map(str::to_string).collect();
        MessagePayload::Command { name, args }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MessagePayload::Text(_) => "text",
            MessagePayload::Command { .. } => "command",
            MessagePayload::Contact { .. } => "contact",
            MessagePayload::Photo { .. } => "photo",
            MessagePayload::Document { .. } => "document",
            MessagePayload::Unsupported => "unsupported",
        }
    }
}
