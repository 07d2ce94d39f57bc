//! SQLite implementation of [`BotStore`].

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::sqlite_pool::SqlitePoolManager;
use crate::{BotStore, ConversationEntry, FileArtifact, SearchLogEntry, StorageError, UserProfile};

#[derive(Clone)]
pub struct SqliteStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteStore {
    /// Opens the database and creates tables if needed.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                chat_id INTEGER PRIMARY KEY,
                first_name TEXT,
                username TEXT,
                phone_number TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                user_message TEXT NOT NULL,
                bot_response TEXT NOT NULL,
                context TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS files (
                id TEXT PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                file_kind TEXT NOT NULL,
                file_name TEXT NOT NULL,
                description TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS searches (
                id TEXT PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                query TEXT NOT NULL,
                results TEXT NOT NULL,
                summary TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_conversations_chat_id ON conversations(chat_id);
            CREATE INDEX IF NOT EXISTS idx_files_chat_id ON files(chat_id);
            CREATE INDEX IF NOT EXISTS idx_searches_chat_id ON searches(chat_id);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    pub async fn file_artifacts_for_chat(&self, chat_id: i64) -> Result<Vec<FileArtifact>, StorageError> {
        let rows = sqlx::query_as::<_, FileArtifact>(
            "SELECT * FROM files WHERE chat_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(chat_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }

    pub async fn search_logs_for_chat(&self, chat_id: i64) -> Result<Vec<SearchLogEntry>, StorageError> {
        let rows = sqlx::query_as::<_, SearchLogEntry>(
            "SELECT * FROM searches WHERE chat_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(chat_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl BotStore for SqliteStore {
    #[instrument(skip(self, profile), fields(chat_id = profile.chat_id))]
    async fn upsert_user(&self, profile: &UserProfile) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (chat_id, first_name, username, phone_number, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(chat_id) DO UPDATE SET
                first_name = excluded.first_name,
                username = excluded.username,
                phone_number = COALESCE(excluded.phone_number, users.phone_number)
            "#,
        )
        .bind(profile.chat_id)
        .bind(&profile.first_name)
        .bind(&profile.username)
        .bind(&profile.phone_number)
        .bind(profile.created_at)
        .execute(self.pool_manager.pool())
        .await?;

        info!(chat_id = profile.chat_id, "Upserted user profile");
        Ok(())
    }

    async fn find_user(&self, chat_id: i64) -> Result<Option<UserProfile>, StorageError> {
        let profile = sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(profile)
    }

    #[instrument(skip(self, entry), fields(chat_id = entry.chat_id))]
    async fn append_log(&self, entry: &ConversationEntry) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (id, chat_id, created_at, user_message, bot_response, context)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.chat_id)
        .bind(entry.created_at)
        .bind(&entry.user_message)
        .bind(&entry.bot_response)
        .bind(&entry.context)
        .execute(self.pool_manager.pool())
        .await?;

        info!(id = %entry.id, chat_id = entry.chat_id, "Saved conversation entry");
        Ok(())
    }

    #[instrument(skip(self, entry), fields(chat_id = entry.chat_id))]
    async fn append_file_metadata(&self, entry: &FileArtifact) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO files (id, chat_id, created_at, file_kind, file_name, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.chat_id)
        .bind(entry.created_at)
        .bind(&entry.file_kind)
        .bind(&entry.file_name)
        .bind(&entry.description)
        .execute(self.pool_manager.pool())
        .await?;

        info!(id = %entry.id, file_kind = %entry.file_kind, "Saved file metadata");
        Ok(())
    }

    #[instrument(skip(self, entry), fields(chat_id = entry.chat_id))]
    async fn append_search_log(&self, entry: &SearchLogEntry) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO searches (id, chat_id, created_at, query, results, summary)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.chat_id)
        .bind(entry.created_at)
        .bind(&entry.query)
        .bind(&entry.results)
        .bind(&entry.summary)
        .execute(self.pool_manager.pool())
        .await?;

        info!(id = %entry.id, query = %entry.query, "Saved search log");
        Ok(())
    }

    async fn logs_for_chat(&self, chat_id: i64) -> Result<Vec<ConversationEntry>, StorageError> {
        let rows = sqlx::query_as::<_, ConversationEntry>(
            "SELECT * FROM conversations WHERE chat_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(chat_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }
}
