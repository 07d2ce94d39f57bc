//! Inbound handlers. Chain order: logging, commands, contact, web search, chat, image, document, fallback.

mod chat;
mod commands;
mod contact;
mod document;
mod fallback;
mod image;
mod logging;
pub mod replies;
mod search_state;
mod web_search;

pub use chat::ChatHandler;
pub use commands::CommandHandler;
pub use contact::ContactHandler;
pub use document::{pdf_text, DocumentHandler, ExtractText, MAX_DOCUMENT_CHARS};
pub use fallback::FallbackHandler;
pub use image::ImageHandler;
pub use logging::LoggingHandler;
pub use search_state::{SearchAction, SearchEvent, SearchState, SearchStates};
pub use web_search::WebSearchHandler;

use std::future::Future;
use std::time::Duration;

use conversation::ConversationError;

/// Runs a model call under `timeout`; a timeout counts as a generation failure.
pub(crate) async fn generate_bounded<F>(
    timeout: Duration,
    generation: F,
) -> std::result::Result<String, ConversationError>
where
    F: Future<Output = anyhow::Result<String>>,
{
    match tokio::time::timeout(timeout, generation).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ConversationError::Generation(e.to_string())),
        Err(_) => Err(ConversationError::Timeout(timeout)),
    }
}
