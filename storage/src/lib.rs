//! Storage crate: durable records for the bot (the system of record).
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UserProfile, ConversationEntry, FileArtifact, SearchLogEntry
//! - [`repository`] – BotStore trait (the store gateway)
//! - [`sqlite_store`] – SqliteStore (SQLite implementation)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod repository;
mod sqlite_pool;
mod sqlite_store;

pub use error::StorageError;
pub use models::{ConversationEntry, FileArtifact, FileKind, SearchLogEntry, UserProfile};
pub use repository::BotStore;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteStore;
