//! Logs each inbound message in before() and the outcome in after(); always continues.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::core::{Handler, HandlerResponse, Message, MessagePayload, Result};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let content_len = match &message.payload {
            MessagePayload::Text(text) => text.chars().count(),
            MessagePayload::Command { args, .. } => args.iter().map(|a| a.chars().count()).sum(),
            _ => 0,
        };
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = message.payload.kind(),
            content_len,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let reply_len = match response {
            HandlerResponse::Reply(text) => Some(text.chars().count()),
            _ => None,
        };
        debug!(
            message_id = %message.id,
            chat_id = message.chat.id,
            response = response.kind(),
            reply_len = ?reply_len,
            "Processed message"
        );
        Ok(())
    }
}
