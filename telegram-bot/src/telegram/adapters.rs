//! Converts teloxide users and messages into core types.

use crate::core::{Chat, Message, MessagePayload, ToCoreMessage, ToCoreUser, User};

/// Telegram user to core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message to core message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            payload: self.payload(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn payload(&self) -> MessagePayload {
        let msg = self.0;
        if let Some(text) = msg.text() {
            return MessagePayload::from_text(text);
        }
        if let Some(contact) = msg.contact() {
            return MessagePayload::Contact {
                phone_number: contact.phone_number.clone(),
            };
        }
        // Sizes are ordered smallest first.
        if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
            return MessagePayload::Photo {
                file_id: largest.file.id.0.clone(),
            };
        }
        if let Some(doc) = msg.document() {
            return MessagePayload::Document {
                file_id: doc.file.id.0.clone(),
                file_name: doc.file_name.clone(),
                mime_type: doc.mime_type.as_ref().map(|m| m.essence_str().to_string()),
            };
        }
        MessagePayload::Unsupported
    }
}
