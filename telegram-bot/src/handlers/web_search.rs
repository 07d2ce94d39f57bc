//! `/websearch`: search, summarize the results with the model, reply with summary and sources.
//!
//! A bare `/websearch` asks for the query and the next text message from that chat is used.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use llm_client::LlmClient;
use storage::{BotStore, SearchLogEntry};
use tracing::{error, info, instrument};
use web_search::{format, SearchClient, SearchError};

use super::search_state::{SearchAction, SearchEvent, SearchStates};
use super::{generate_bounded, replies};
use crate::core::{Bot, Handler, HandlerResponse, Message, MessagePayload, Result};

pub const WEBSEARCH_COMMAND: &str = "websearch";

pub struct WebSearchHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn BotStore>,
    search: Option<Arc<dyn SearchClient>>,
    states: Arc<SearchStates>,
    top_k: usize,
    timeout: Duration,
}

impl WebSearchHandler {
    /// `search` is `None` when no search key is configured.
    pub fn new(
        bot: Arc<dyn Bot>,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn BotStore>,
        search: Option<Arc<dyn SearchClient>>,
        states: Arc<SearchStates>,
        top_k: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            bot,
            llm,
            store,
            search,
            states,
            top_k,
            timeout,
        }
    }

    async fn run_search(
        &self,
        message: &Message,
        search: &dyn SearchClient,
        query: String,
    ) -> Result<HandlerResponse> {
        let chat_id = message.session_id();
        self.bot
            .send_message(&message.chat, &replies::searching(&query))
            .await?;

        let results = match search.search(&query, self.top_k).await {
            Ok(results) => results,
            Err(SearchError::NotConfigured) => {
                self.bot
                    .send_message(&message.chat, replies::SEARCH_NOT_CONFIGURED)
                    .await?;
                return Ok(HandlerResponse::Reply(replies::SEARCH_NOT_CONFIGURED.to_string()));
            }
            Err(e) => {
                error!(chat_id, query = %query, error = %e, "Web search failed");
                self.bot
                    .send_message(&message.chat, &replies::search_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };
        info!(chat_id, results = results.len(), "step: search results received");

        if results.is_empty() {
            self.bot
                .send_message(&message.chat, replies::NO_SEARCH_RESULTS)
                .await?;
            return Ok(HandlerResponse::Reply(replies::NO_SEARCH_RESULTS.to_string()));
        }

        let prompt = format::summary_prompt(&query, &results);
        let summary = match generate_bounded(self.timeout, self.llm.generate(&prompt)).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(chat_id, error = %e, "Search summary failed");
                self.bot
                    .send_message(&message.chat, &replies::search_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        let reply = format::format_reply(&query, &summary, &results);

        match SearchLogEntry::new(chat_id, query, &results, summary) {
            Ok(entry) => {
                if let Err(e) = self.store.append_search_log(&entry).await {
                    error!(chat_id, error = %e, "Failed to persist search log");
                }
            }
            Err(e) => error!(chat_id, error = %e, "Failed to encode search results"),
        }

        self.bot.send_message(&message.chat, &reply).await?;

        Ok(HandlerResponse::Reply(reply))
    }
}

#[async_trait]
impl Handler for WebSearchHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let query;
        let event = match &message.payload {
            MessagePayload::Command { name, args } if name == WEBSEARCH_COMMAND => {
                query = args.join(" ");
                SearchEvent::Command(Some(query.as_str()))
            }
            MessagePayload::Text(text) => SearchEvent::Text(text),
            _ => SearchEvent::Other,
        };
        let is_command = matches!(event, SearchEvent::Command(_));

        let Some(search) = self.search.as_deref() else {
            if is_command {
                self.bot
                    .send_message(&message.chat, replies::SEARCH_NOT_CONFIGURED)
                    .await?;
                return Ok(HandlerResponse::Reply(replies::SEARCH_NOT_CONFIGURED.to_string()));
            }
            return Ok(HandlerResponse::Ignore);
        };

        match self.states.apply(message.session_id(), event).await {
            SearchAction::Pass => Ok(HandlerResponse::Ignore),
            SearchAction::PromptForQuery => {
                self.bot
                    .send_message(&message.chat, replies::SEARCH_PROMPT)
                    .await?;
                Ok(HandlerResponse::Reply(replies::SEARCH_PROMPT.to_string()))
            }
            SearchAction::Search(query) => self.run_search(message, search, query).await,
        }
    }
}
