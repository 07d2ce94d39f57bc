//! Last in the chain: answers commands and payloads nobody handled.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use super::replies;
use crate::core::{Bot, Handler, HandlerResponse, Message, MessagePayload, Result};

pub struct FallbackHandler {
    bot: Arc<dyn Bot>,
}

impl FallbackHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for FallbackHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let reply = match &message.payload {
            MessagePayload::Command { name, .. } => replies::unknown_command(name),
            MessagePayload::Unsupported => replies::UNSUPPORTED_MESSAGE.to_string(),
            _ => return Ok(HandlerResponse::Ignore),
        };
        info!(kind = message.payload.kind(), "Unhandled message");
        self.bot.send_message(&message.chat, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
