//! OpenAI-compatible [`LlmClient`]: wraps openai-client, optionally prepends a system message.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient, LlmConfig};

/// MIME type sent with image requests; Telegram re-encodes photos as JPEG.
const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// [`LlmClient`] backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: crate::config::DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_system_prompt_opt(config.system_prompt().map(str::to_string))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Messages for a text prompt: optional system, then the prompt as one user message.
    fn messages_for(&self, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref system) = self.system_prompt {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(prompt));
        messages
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let openai_messages = self
            .messages_for(prompt)
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client.chat_completion(&self.model, openai_messages).await
    }

    #[instrument(skip(self, instruction, image), fields(image_bytes = image.len()))]
    async fn generate_with_image(&self, instruction: &str, image: &[u8]) -> Result<String> {
        self.client
            .chat_completion_with_image(&self.model, instruction, IMAGE_MIME_TYPE, image)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt::MessageRole;

    #[test]
    fn test_messages_without_system_prompt() {
        let client = OpenAILlmClient::with_base_url("k".into(), "http://localhost".into());
        let messages = client.messages_for("hello");
        assert_eq!(messages, vec![ChatMessage::user("hello")]);
    }

    #[test]
    fn test_messages_with_system_prompt() {
        let client = OpenAILlmClient::with_base_url("k".into(), "http://localhost".into())
            .with_system_prompt_opt(Some("Be brief.".into()));
        let messages = client.messages_for("hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_default_model() {
        let client = OpenAILlmClient::with_base_url("k".into(), "http://localhost".into());
        assert_eq!(client.model(), crate::config::DEFAULT_MODEL);
    }
}
