//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for chat completion with plain text or text plus an inline image.
//! Any OpenAI-compatible endpoint works; the bot points it at the hosted Gemini endpoint.
//! Provides token masking for safe logging.

use async_openai::types::{
    ChatCompletionRequestMessageContentPartImageArgs, ChatCompletionRequestMessageContentPartTextArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    CreateChatCompletionRequestArgs, ImageDetail, ImageUrlArgs,
};
use async_openai::Client;
use base64::Engine;
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        "***".to_string()
    } else {
        let head: String = chars[..7].iter().collect();
        let tail: String = chars[len - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}

/// Encodes image bytes as a `data:` URL accepted by the `image_url` content part.
pub fn image_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, encoded)
}

/// Chat client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    api_key_for_logging: Option<String>,
}

impl OpenAIClient {
    /// Builds a client with a custom base URL (compatible endpoints such as Gemini's).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    fn masked_key(&self) -> String {
        self.api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string())
    }

    /// Sends a chat completion request and returns the first choice's text.
    ///
    /// Logs masked API key and token usage. Errors if the response has no choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_len = json.len(), "chat_completion request JSON built");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in completion response"),
        }
    }

    /// Sends one user message made of `instruction` and an inline image, returns the reply text.
    pub async fn chat_completion_with_image(
        &self,
        model: &str,
        instruction: &str,
        mime_type: &str,
        image: &[u8],
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            image_bytes = image.len(),
            mime_type = %mime_type,
            "chat_completion_with_image request"
        );

        let text_part: ChatCompletionRequestUserMessageContentPart =
            ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(instruction)
                .build()?
                .into();
        let image_part: ChatCompletionRequestUserMessageContentPart =
            ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(
                    ImageUrlArgs::default()
                        .url(image_data_url(mime_type, image))
                        .detail(ImageDetail::Auto)
                        .build()?,
                )
                .build()?
                .into();

        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(vec![
                text_part, image_part,
            ]))
            .build()?
            .into();

        self.chat_completion(model, vec![message]).await
    }
}
