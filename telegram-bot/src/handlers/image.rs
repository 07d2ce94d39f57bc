//! Photo: download, ask the model to describe it, record file metadata, reply.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use llm_client::LlmClient;
use storage::{BotStore, FileArtifact, FileKind};
use tracing::{error, info, instrument};

use super::{generate_bounded, replies};
use crate::core::{Bot, Handler, HandlerResponse, Message, MessagePayload, Result};

pub struct ImageHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn BotStore>,
    timeout: Duration,
}

impl ImageHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn BotStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            bot,
            llm,
            store,
            timeout,
        }
    }
}

#[async_trait]
impl Handler for ImageHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessagePayload::Photo { file_id } = &message.payload else {
            return Ok(HandlerResponse::Ignore);
        };
        let chat_id = message.session_id();

        let image = match self.bot.download_file(file_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(chat_id, file_id = %file_id, error = %e, "Failed to download photo");
                self.bot
                    .send_message(&message.chat, &replies::image_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };
        info!(chat_id, bytes = image.len(), "step: photo downloaded, describing");

        let description = match generate_bounded(
            self.timeout,
            self.llm.generate_with_image(prompt::IMAGE_INSTRUCTION, &image),
        )
        .await
        {
            Ok(text) => text,
            Err(e) => {
                error!(chat_id, error = %e, "Image description failed");
                self.bot
                    .send_message(&message.chat, &replies::image_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        let artifact = FileArtifact::new(
            chat_id,
            FileKind::Image,
            format!("{}.jpg", file_id),
            description.clone(),
        );
        if let Err(e) = self.store.append_file_metadata(&artifact).await {
            error!(chat_id, error = %e, "Failed to persist image metadata");
        }

        let reply = replies::model_reply(&description).to_string();
        self.bot.send_message(&message.chat, &reply).await?;

        Ok(HandlerResponse::Reply(reply))
    }
}
