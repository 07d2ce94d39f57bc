//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Tests substitute another Bot impl.

use crate::core::{Bot as CoreBot, Chat, DbotError, Result};
use crate::handlers::replies::SHARE_CONTACT_BUTTON;
use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, ChatId, FileId, KeyboardButton, KeyboardMarkup};
use tracing::debug;

use super::split::{split_message, TELEGRAM_MESSAGE_LIMIT};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let chunks = split_message(text, TELEGRAM_MESSAGE_LIMIT);
        debug!(chat_id = chat.id, chunks = chunks.len(), "Sending message");
        for chunk in chunks {
            self.bot
                .send_message(ChatId(chat.id), chunk.to_string())
                .await
                .map_err(|e| DbotError::Bot(e.to_string()))?;
        }
        Ok(())
    }

    async fn request_contact(&self, chat: &Chat, text: &str) -> Result<()> {
        let keyboard = KeyboardMarkup::new(vec![vec![
            KeyboardButton::new(SHARE_CONTACT_BUTTON).request(ButtonRequest::Contact),
        ]])
        .one_time_keyboard()
        .resize_keyboard();
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        let mut buf: Vec<u8> = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        debug!(file_id = %file_id, bytes = buf.len(), "Downloaded file");
        Ok(buf)
    }
}
