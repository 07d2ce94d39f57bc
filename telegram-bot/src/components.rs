//! Component factory: builds BotComponents from config and assembles the handler chain.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use conversation::{ConversationManager, HistoryStore};
use llm_client::{LlmClient, OpenAILlmClient};
use openai_client::mask_token;
use storage::{BotStore, SqliteStore};
use tracing::{error, info, instrument, warn};
use web_search::{SearchClient, SerpApiClient};

use super::config::BotConfig;
use crate::chain::HandlerChain;
use crate::core::Bot as CoreBot;
use crate::handlers::{
    ChatHandler, CommandHandler, ContactHandler, DocumentHandler, FallbackHandler, ImageHandler,
    LoggingHandler, SearchStates, WebSearchHandler,
};
use crate::telegram::TelegramBotAdapter;

/// Shared dependencies handed to every handler.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn CoreBot>,
    pub store: Arc<dyn BotStore>,
    pub llm: Arc<dyn LlmClient>,
    /// `None` when SERPAPI_API_KEY is empty.
    pub search: Option<Arc<dyn SearchClient>>,
    pub conversation: Arc<ConversationManager>,
    pub search_states: Arc<SearchStates>,
    pub llm_timeout: Duration,
    pub search_top_k: usize,
}

impl BotComponents {
    /// Assembles components from already-built gateways. History store and search states start empty.
    pub fn from_parts(
        config: &BotConfig,
        bot: Arc<dyn CoreBot>,
        store: Arc<dyn BotStore>,
        llm: Arc<dyn LlmClient>,
        search: Option<Arc<dyn SearchClient>>,
    ) -> Self {
        let llm_timeout = config.llm_timeout();
        let history = Arc::new(HistoryStore::new(
            config.conversation.window,
            config.conversation.prompt_mode(),
        ));
        let conversation = Arc::new(ConversationManager::new(history, llm.clone(), llm_timeout));
        Self {
            bot,
            store,
            llm,
            search,
            conversation,
            search_states: Arc::new(SearchStates::new()),
            llm_timeout,
            search_top_k: config.search.top_k,
        }
    }
}

/// Creates the teloxide bot, honoring TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds the production gateways (SQLite store, OpenAI-compatible LLM, SerpAPI) for `bot`.
#[instrument(skip(config, teloxide_bot))]
pub async fn build_bot_components(
    config: &BotConfig,
    teloxide_bot: teloxide::Bot,
) -> Result<BotComponents> {
    let store: Arc<dyn BotStore> = Arc::new(
        SqliteStore::new(config.database_url())
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    database_url = %config.database_url(),
                    "Failed to initialize storage"
                );
                anyhow::anyhow!("Failed to initialize storage: {}", e)
            })?,
    );

    let llm_client = OpenAILlmClient::from_config(&config.llm);
    info!(
        model = %llm_client.model(),
        base_url = %config.llm.llm_base_url,
        api_key = %mask_token(&config.llm.llm_api_key),
        timeout_secs = config.llm_timeout().as_secs(),
        "LLM client configured"
    );
    let llm: Arc<dyn LlmClient> = Arc::new(llm_client);

    let search: Option<Arc<dyn SearchClient>> = if config.search.is_configured() {
        let client = SerpApiClient::with_base_url(
            config.search.serpapi_api_key.clone(),
            config.search.serpapi_url.clone(),
        )?;
        info!(
            api_key = %mask_token(&config.search.serpapi_api_key),
            top_k = config.search.top_k,
            "Web search enabled"
        );
        Some(Arc::new(client))
    } else {
        warn!("SERPAPI_API_KEY not set, /websearch disabled");
        None
    };

    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot));

    Ok(BotComponents::from_parts(config, bot, store, llm, search))
}

/// Builds the handler chain. Web search runs before chat so a pending query is not sent to the model as chat.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let c = components;
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(
            c.bot.clone(),
            c.conversation.clone(),
            c.store.clone(),
        )))
        .add_handler(Arc::new(ContactHandler::new(c.bot.clone(), c.store.clone())))
        .add_handler(Arc::new(WebSearchHandler::new(
            c.bot.clone(),
            c.llm.clone(),
            c.store.clone(),
            c.search.clone(),
            c.search_states.clone(),
            c.search_top_k,
            c.llm_timeout,
        )))
        .add_handler(Arc::new(ChatHandler::new(
            c.bot.clone(),
            c.conversation.clone(),
            c.store.clone(),
        )))
        .add_handler(Arc::new(ImageHandler::new(
            c.bot.clone(),
            c.llm.clone(),
            c.store.clone(),
            c.llm_timeout,
        )))
        .add_handler(Arc::new(DocumentHandler::new(
            c.bot.clone(),
            c.llm.clone(),
            c.store.clone(),
            c.llm_timeout,
        )))
        .add_handler(Arc::new(FallbackHandler::new(c.bot.clone())))
}
