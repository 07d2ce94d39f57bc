//! Bot configuration: BaseConfig (Telegram + log + DB) plus LLM, conversation and search configs.

mod base;
mod bot_config;
mod extensions;

#[cfg(test)]
mod tests;

pub use base::{BaseConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
pub use bot_config::BotConfig;
pub use extensions::{ConversationConfig, SearchConfig, DEFAULT_SEARCH_TOP_K};
