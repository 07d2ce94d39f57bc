//! Free-text chat: one exchange through the conversation manager, log it, then reply.

use std::sync::Arc;

use async_trait::async_trait;
use conversation::ConversationManager;
use storage::{BotStore, ConversationEntry};
use tracing::{error, info, instrument};

use super::replies;
use crate::core::{Bot, Handler, HandlerResponse, Message, Result};

pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    conversation: Arc<ConversationManager>,
    store: Arc<dyn BotStore>,
}

impl ChatHandler {
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
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(text) = message.text() else {
            return Ok(HandlerResponse::Ignore);
        };
        if text.trim().is_empty() {
            return Ok(HandlerResponse::Ignore);
        }
        let session_id = message.session_id();

        let exchange = match self.conversation.exchange(session_id, text).await {
            Ok(exchange) => exchange,
            Err(e) => {
                error!(session_id, error = %e, "Chat generation failed");
                self.bot
                    .send_message(&message.chat, &replies::generation_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        let context = (!exchange.context.is_empty()).then(|| exchange.context.clone());
        let entry =
            ConversationEntry::new(session_id, text.to_string(), exchange.reply.clone(), context);
        if let Err(e) = self.store.append_log(&entry).await {
            error!(session_id, error = %e, "Failed to persist conversation log");
        }

        let reply = replies::model_reply(&exchange.reply).to_string();
        self.bot.send_message(&message.chat, &reply).await?;
        info!(session_id, reply_len = reply.len(), "step: chat reply sent");

        Ok(HandlerResponse::Reply(reply))
    }
}
