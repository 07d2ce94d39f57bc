//! Shared contact: store the phone number on the chat's profile.

use std::sync::Arc;

use async_trait::async_trait;
use storage::{BotStore, UserProfile};
use tracing::{error, info, instrument};

use super::replies;
use crate::core::{Bot, Handler, HandlerResponse, Message, MessagePayload, Result};

pub struct ContactHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn BotStore>,
}

impl ContactHandler {
    pub fn new(bot: Arc<dyn Bot>, store: Arc<dyn BotStore>) -> Self {
        Self { bot, store }
    }
}

#[async_trait]
impl Handler for ContactHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessagePayload::Contact { phone_number } = &message.payload else {
            return Ok(HandlerResponse::Ignore);
        };
        let chat_id = message.session_id();

        // Profile may be missing when /start was skipped.
        let profile = match self.store.find_user(chat_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => UserProfile::new(
                chat_id,
                message.user.first_name.clone(),
                message.user.username.clone(),
            ),
            Err(e) => {
                error!(chat_id, error = %e, "Failed to look up user profile");
                UserProfile::new(
                    chat_id,
                    message.user.first_name.clone(),
                    message.user.username.clone(),
                )
            }
        };

        match self
            .store
            .upsert_user(&profile.with_phone_number(phone_number.clone()))
            .await
        {
            Ok(()) => info!(chat_id, "Phone number registered"),
            Err(e) => error!(chat_id, error = %e, "Failed to store phone number"),
        }

        self.bot
            .send_message(&message.chat, replies::CONTACT_SAVED)
            .await?;
        Ok(HandlerResponse::Reply(replies::CONTACT_SAVED.to_string()))
    }
}
