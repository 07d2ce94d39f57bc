//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the inference gateway) and an OpenAI-compatible implementation.
//! Transport-agnostic; used by the conversation manager and the attachment handlers.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_llm::OpenAILlmClient;

/// Inference gateway: stateless request/response calls to a hosted model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply for a single text prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Returns the model reply for an instruction plus one JPEG/PNG image.
    async fn generate_with_image(&self, instruction: &str, image: &[u8]) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
