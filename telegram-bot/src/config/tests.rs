//! Config tests.

use crate::config::bot_config::BotConfig;
use crate::config::{ConversationConfig, SearchConfig};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "DATABASE_URL",
    "LOG_FILE",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LLM_API_KEY",
    "GEMINI_API_KEY",
    "LLM_BASE_URL",
    "LLM_MODEL",
    "LLM_TIMEOUT_SECS",
    "LLM_SYSTEM_PROMPT",
    "HISTORY_WINDOW",
    "HISTORY_AWARE",
    "SERPAPI_API_KEY",
    "SERPAPI_URL",
    "SEARCH_TOP_K",
];

fn reset_env() {
    for var in VARS {
        env::remove_var(var);
    }
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("GEMINI_API_KEY", "test_key");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    reset_env();

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.database_url(), "sqlite://./data/telegram_bot.db");
    assert_eq!(config.log_file(), "logs/telegram-bot.log");
    assert_eq!(config.llm.llm_api_key, "test_key");
    assert_eq!(config.llm.llm_model, "gemini-1.5-flash");
    assert_eq!(config.llm_timeout(), std::time::Duration::from_secs(60));
    assert_eq!(config.conversation.window, 10);
    assert!(config.conversation.history_aware);
    assert!(!config.search.is_configured());
    assert_eq!(config.search.top_k, 5);
    config.validate().unwrap();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    reset_env();
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("HISTORY_WINDOW", "2");
    env::set_var("HISTORY_AWARE", "false");
    env::set_var("SERPAPI_API_KEY", "serp_key");
    env::set_var("SEARCH_TOP_K", "3");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.database_url(), "sqlite::memory:");
    assert_eq!(
        config.conversation,
        ConversationConfig {
            window: 2,
            history_aware: false
        }
    );
    assert_eq!(
        config.conversation.prompt_mode(),
        conversation::PromptMode::Stateless
    );
    assert!(config.search.is_configured());
    assert_eq!(config.search.top_k, 3);

    reset_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    reset_env();
    env::set_var("BOT_TOKEN", "env_token");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
}

#[test]
#[serial]
fn test_load_config_missing_token_fails() {
    reset_env();
    env::remove_var("BOT_TOKEN");

    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_load_config_missing_llm_key_fails() {
    reset_env();
    env::remove_var("GEMINI_API_KEY");

    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    reset_env();
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::remove_var("TELEGRAM_API_URL");
}

#[test]
#[serial]
fn test_invalid_history_window_rejected() {
    reset_env();
    env::set_var("HISTORY_WINDOW", "ten");
    assert!(ConversationConfig::from_env().is_err());

    env::set_var("HISTORY_WINDOW", "0");
    let config = ConversationConfig::from_env().unwrap();
    assert!(config.validate().is_err());

    env::remove_var("HISTORY_WINDOW");
}

#[test]
#[serial]
fn test_blank_serpapi_key_is_not_configured() {
    reset_env();
    env::set_var("SERPAPI_API_KEY", "   ");

    let config = SearchConfig::from_env().unwrap();
    assert!(!config.is_configured());

    env::remove_var("SERPAPI_API_KEY");
}
