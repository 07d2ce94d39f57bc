//! Shared mocks and builders for handler tests. No network.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use llm_client::{EnvLlmConfig, LlmClient};
use storage::{
    BotStore, ConversationEntry, FileArtifact, SearchLogEntry, StorageError, UserProfile,
};
use telegram_bot::config::{BaseConfig, ConversationConfig, SearchConfig};
use telegram_bot::{
    build_handler_chain, Bot, BotComponents, BotConfig, Chat, DbotError, HandlerChain, Message,
    MessagePayload, User,
};
use web_search::{SearchClient, SearchError, SearchResult};

/// What the bot was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    ContactRequest { chat_id: i64, text: String },
}

impl Sent {
    pub fn text(&self) -> &str {
        match self {
            Sent::Text { text, .. } | Sent::ContactRequest { text, .. } => text,
        }
    }
}

/// Records outbound messages; serves files from an in-memory map.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_sends_after: Option<usize>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, file_id: &str, bytes: &[u8]) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(file_id.to_string(), bytes.to_vec());
        self
    }

    /// `send_message` fails once `count` messages have been sent.
    pub fn failing_sends_after(mut self, count: usize) -> Self {
        self.fail_sends_after = Some(count);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().iter().map(|s| s.text().to_string()).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().last().cloned()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> telegram_bot::Result<()> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_sends_after.is_some_and(|count| sent.len() >= count) {
            return Err(DbotError::Bot("send failed".to_string()));
        }
        sent.push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn request_contact(&self, chat: &Chat, text: &str) -> telegram_bot::Result<()> {
        self.sent.lock().unwrap().push(Sent::ContactRequest {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> telegram_bot::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| DbotError::Bot(format!("file not found: {}", file_id)))
    }
}

/// Replies from a script; falls back to `default_reply` when the script is empty.
pub struct MockLlm {
    script: Mutex<VecDeque<Result<String, String>>>,
    default_reply: String,
    prompts: Mutex<Vec<String>>,
    images: Mutex<Vec<(String, usize)>>,
}

impl MockLlm {
    pub fn replying(default_reply: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply: default_reply.to_string(),
            prompts: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        let llm = Self::replying("unused");
        llm.push_err(message);
        llm
    }

    pub fn push_ok(&self, reply: &str) {
        self.script.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub fn push_err(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<(String, usize)> {
        self.images.lock().unwrap().clone()
    }

    fn next(&self) -> anyhow::Result<String> {
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(self.default_reply.clone()),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.next()
    }

    async fn generate_with_image(&self, instruction: &str, image: &[u8]) -> anyhow::Result<String> {
        self.images
            .lock()
            .unwrap()
            .push((instruction.to_string(), image.len()));
        self.next()
    }
}

/// Returns fixed results or a fixed error; records queries.
pub struct MockSearch {
    outcome: Result<Vec<SearchResult>, String>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            outcome: Ok(results),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), top_k));
        match &self.outcome {
            Ok(results) => Ok(results.iter().take(top_k).cloned().collect()),
            Err(message) => Err(SearchError::Api(message.clone())),
        }
    }
}

pub fn search_result(title: &str, link: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        link: link.to_string(),
        snippet: format!("About {}", title),
        date: "2024-01-01".to_string(),
    }
}

/// In-memory store. With `failing`, every call returns a database error.
#[derive(Default)]
pub struct MockStore {
    failing: bool,
    pub users: Mutex<HashMap<i64, UserProfile>>,
    pub logs: Mutex<Vec<ConversationEntry>>,
    pub files: Mutex<Vec<FileArtifact>>,
    pub searches: Mutex<Vec<SearchLogEntry>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            Err(StorageError::Database("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BotStore for MockStore {
    async fn upsert_user(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let phone_number = profile
            .phone_number
            .clone()
            .or_else(|| users.get(&profile.chat_id).and_then(|p| p.phone_number.clone()));
        users.insert(
            profile.chat_id,
            UserProfile {
                phone_number,
                ..profile.clone()
            },
        );
        Ok(())
    }

    async fn find_user(&self, chat_id: i64) -> Result<Option<UserProfile>, StorageError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(&chat_id).cloned())
    }

    async fn append_log(&self, entry: &ConversationEntry) -> Result<(), StorageError> {
        self.check()?;
        self.logs.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn append_file_metadata(&self, entry: &FileArtifact) -> Result<(), StorageError> {
        self.check()?;
        self.files.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn append_search_log(&self, entry: &SearchLogEntry) -> Result<(), StorageError> {
        self.check()?;
        self.searches.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn logs_for_chat(&self, chat_id: i64) -> Result<Vec<ConversationEntry>, StorageError> {
        self.check()?;
        Ok(self
            .logs
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.chat_id == chat_id)
            .cloned()
            .collect())
    }
}

/// Config built in code so tests never touch the process environment.
pub fn test_config(window: usize) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "123456:test-token".to_string(),
            telegram_api_url: None,
            log_file: "logs/test.log".to_string(),
            database_url: "sqlite::memory:".to_string(),
        },
        llm: EnvLlmConfig {
            llm_api_key: "test-key".to_string(),
            llm_base_url: "http://localhost:1/v1/".to_string(),
            llm_model: "test-model".to_string(),
            llm_timeout_secs: 5,
            llm_system_prompt: None,
        },
        conversation: ConversationConfig {
            window,
            history_aware: true,
        },
        search: SearchConfig {
            serpapi_api_key: "serp-key".to_string(),
            serpapi_url: "http://localhost:1/search.json".to_string(),
            top_k: 3,
        },
    }
}

/// Mocks plus the assembled chain.
pub struct Harness {
    pub bot: Arc<MockBot>,
    pub llm: Arc<MockLlm>,
    pub store: Arc<MockStore>,
    pub search: Option<Arc<MockSearch>>,
    pub components: BotComponents,
    pub chain: HandlerChain,
}

impl Harness {
    pub fn new(llm: MockLlm) -> Self {
        Self::build(
            MockBot::new(),
            llm,
            MockStore::new(),
            Some(MockSearch::with_results(Vec::new())),
            10,
        )
    }

    pub fn build(
        bot: MockBot,
        llm: MockLlm,
        store: MockStore,
        search: Option<MockSearch>,
        window: usize,
    ) -> Self {
        let bot = Arc::new(bot);
        let llm = Arc::new(llm);
        let store = Arc::new(store);
        let search = search.map(Arc::new);
        let components = BotComponents::from_parts(
            &test_config(window),
            bot.clone(),
            store.clone(),
            llm.clone(),
            search
                .clone()
                .map(|s| s as Arc<dyn SearchClient>),
        );
        let chain = build_handler_chain(&components);
        Self {
            bot,
            llm,
            store,
            search,
            components,
            chain,
        }
    }

    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.components.llm_timeout = timeout;
        self.chain = build_handler_chain(&self.components);
        self
    }
}

pub fn message(chat_id: i64, payload: MessagePayload) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: chat_id,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "Private".to_string(),
        },
        payload,
        created_at: chrono::Utc::now(),
    }
}

/// Text or command, parsed the way the Telegram adapter parses it.
pub fn text(chat_id: i64, text: &str) -> Message {
    message(chat_id, MessagePayload::from_text(text))
}
