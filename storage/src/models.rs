//! Durable record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::StorageError;

/// One profile per chat. Phone number stays `None` until a contact is shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(chat_id: i64, first_name: Option<String>, username: Option<String>) -> Self {
        Self {
            chat_id,
            first_name,
            username,
            phone_number: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// One completed chat exchange. `context` is the rendered history the prompt was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConversationEntry {
    pub id: String,
    pub chat_id: i64,
    pub created_at: DateTime<Utc>,
    pub user_message: String,
    pub bot_response: String,
    pub context: Option<String>,
}

impl ConversationEntry {
    pub fn new(
        chat_id: i64,
        user_message: String,
        bot_response: String,
        context: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            chat_id,
            created_at: Utc::now(),
            user_message,
            bot_response,
            context,
        }
    }
}

/// Kind of uploaded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    Document,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
        }
    }
}

/// Metadata and generated description for an uploaded image or document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FileArtifact {
    pub id: String,
    pub chat_id: i64,
    pub created_at: DateTime<Utc>,
    pub file_kind: String,
    pub file_name: String,
    pub description: String,
}

impl FileArtifact {
    pub fn new(chat_id: i64, kind: FileKind, file_name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            chat_id,
            created_at: Utc::now(),
            file_kind: kind.as_str().to_string(),
            file_name,
            description,
        }
    }
}

/// A `/websearch` run: query, results (JSON array), and the model's summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SearchLogEntry {
    pub id: String,
    pub chat_id: i64,
    pub created_at: DateTime<Utc>,
    pub query: String,
    pub results: String,
    pub summary: String,
}

impl SearchLogEntry {
    pub fn new<T: Serialize>(
        chat_id: i64,
        query: String,
        results: &T,
        summary: String,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            chat_id,
            created_at: Utc::now(),
            query,
            results: serde_json::to_string(results)?,
            summary,
        })
    }
}
