//! `/start`, `/help` and `/clear`. Other commands pass through.

use std::sync::Arc;

use async_trait::async_trait;
use conversation::ConversationManager;
use storage::{BotStore, UserProfile};
use tracing::{error, info, instrument};

use super::replies;
use crate::core::{Bot, Handler, HandlerResponse, Message, Result};

pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    conversation: Arc<ConversationManager>,
    store: Arc<dyn BotStore>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        conversation: Arc<ConversationManager>,
        store: Arc<dyn BotStore>,
    ) -> Self {
        Self {
            bot,
            conversation,
            store,
        }
    }

    /// Registers unknown chats and asks for their contact; greets known ones.
    async fn start(&self, message: &Message) -> Result<HandlerResponse> {
        let chat_id = message.session_id();
        match self.store.find_user(chat_id).await {
            Ok(Some(_)) => {
                self.bot.send_message(&message.chat, replies::WELCOME_BACK).await?;
                return Ok(HandlerResponse::Reply(replies::WELCOME_BACK.to_string()));
            }
            Ok(None) => {}
            Err(e) => error!(chat_id, error = %e, "Failed to look up user profile"),
        }

        let profile = UserProfile::new(
            chat_id,
            message.user.first_name.clone(),
            message.user.username.clone(),
        );
        match self.store.upsert_user(&profile).await {
            Ok(()) => info!(
                chat_id,
                username = %message.user.username.as_deref().unwrap_or("unknown"),
                "New user registered"
            ),
            Err(e) => error!(chat_id, error = %e, "Failed to register user profile"),
        }

        self.bot
            .request_contact(&message.chat, replies::REQUEST_CONTACT)
            .await?;
        Ok(HandlerResponse::Reply(replies::REQUEST_CONTACT.to_string()))
    }

    async fn clear(&self, message: &Message) -> Result<HandlerResponse> {
        self.conversation.clear(message.session_id()).await;
        self.bot
            .send_message(&message.chat, replies::HISTORY_CLEARED)
            .await?;
        Ok(HandlerResponse::Reply(replies::HISTORY_CLEARED.to_string()))
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some((name, _args)) = message.command() else {
            return Ok(HandlerResponse::Ignore);
        };
        match name {
            "start" => self.start(message).await,
            "help" => {
                self.bot.send_message(&message.chat, replies::HELP_TEXT).await?;
                Ok(HandlerResponse::Reply(replies::HELP_TEXT.to_string()))
            }
            "clear" => self.clear(message).await,
            _ => Ok(HandlerResponse::Ignore),
        }
    }
}
