use async_trait::async_trait;

use crate::{ConversationEntry, FileArtifact, SearchLogEntry, StorageError, UserProfile};

/// Store gateway: user profiles plus append-only logs.
///
/// Logs are never read back into the in-memory conversation history.
#[async_trait]
pub trait BotStore: Send + Sync {
    /// Inserts or updates the profile keyed by `chat_id`. A `None` phone number keeps the stored one.
    async fn upsert_user(&self, profile: &UserProfile) -> Result<(), StorageError>;
    async fn find_user(&self, chat_id: i64) -> Result<Option<UserProfile>, StorageError>;
    async fn append_log(&self, entry: &ConversationEntry) -> Result<(), StorageError>;
    async fn append_file_metadata(&self, entry: &FileArtifact) -> Result<(), StorageError>;
    async fn append_search_log(&self, entry: &SearchLogEntry) -> Result<(), StorageError>;
    /// Conversation log for a chat, oldest first.
    async fn logs_for_chat(&self, chat_id: i64) -> Result<Vec<ConversationEntry>, StorageError>;
}
