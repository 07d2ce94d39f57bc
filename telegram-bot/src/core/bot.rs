//! Bot abstraction for sending messages and fetching attachments.
//!
//! [`Bot`] is transport-agnostic; the teloxide implementation lives in `telegram::TelegramBotAdapter`.

use crate::core::error::Result;
use crate::core::types::Chat;
use async_trait::async_trait;

/// Outbound operations handlers need. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the chat. Implementations split text that exceeds the transport limit.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends `text` with a one-time keyboard asking the user to share their contact.
    async fn request_contact(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Downloads an attachment by its transport file id.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}
