//! Error type for the bot core: transport, store and IO failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Database error: {0}")]
    Database(String),

    /// Transport failure (send, download).
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<storage::StorageError> for DbotError {
    fn from(e: storage::StorageError) -> Self {
        DbotError::Database(e.to_string())
    }
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
