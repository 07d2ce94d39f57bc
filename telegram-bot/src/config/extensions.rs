//! Extension configs: conversation history and web search. LLM config lives in llm-client.

use anyhow::{Context, Result};
use std::env;

/// Default number of results requested from the search gateway.
pub const DEFAULT_SEARCH_TOP_K: usize = 5;

/// HISTORY_WINDOW and HISTORY_AWARE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationConfig {
    /// Exchanges retained per session (2x raw turns).
    pub window: usize,
    /// History-aware prompting; false renders each message on its own.
    pub history_aware: bool,
}

impl ConversationConfig {
    pub fn from_env() -> Result<Self> {
        let window = match env::var("HISTORY_WINDOW") {
            Ok(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("HISTORY_WINDOW is not a number: {}", v))?,
            Err(_) => conversation::DEFAULT_WINDOW,
        };
        let history_aware = match env::var("HISTORY_AWARE") {
            Ok(v) => parse_bool(&v).with_context(|| format!("HISTORY_AWARE is not a bool: {}", v))?,
            Err(_) => true,
        };
        Ok(Self {
            window,
            history_aware,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            anyhow::bail!("HISTORY_WINDOW must be at least 1");
        }
        Ok(())
    }

    pub fn prompt_mode(&self) -> conversation::PromptMode {
        if self.history_aware {
            conversation::PromptMode::HistoryAware
        } else {
            conversation::PromptMode::Stateless
        }
    }
}

/// SERPAPI_API_KEY, SERPAPI_URL and SEARCH_TOP_K.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Empty means web search is not configured.
    pub serpapi_api_key: String,
    pub serpapi_url: String,
    pub top_k: usize,
}

impl SearchConfig {
    pub fn from_env() -> Result<Self> {
        let serpapi_api_key = env::var("SERPAPI_API_KEY").unwrap_or_default();
        let serpapi_url =
            env::var("SERPAPI_URL").unwrap_or_else(|_| web_search::DEFAULT_SERPAPI_URL.to_string());
        let top_k = match env::var("SEARCH_TOP_K") {
            Ok(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("SEARCH_TOP_K is not a number: {}", v))?,
            Err(_) => DEFAULT_SEARCH_TOP_K,
        };
        Ok(Self {
            serpapi_api_key,
            serpapi_url,
            top_k,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.serpapi_api_key.trim().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            anyhow::bail!("SEARCH_TOP_K must be at least 1");
        }
        if reqwest::Url::parse(&self.serpapi_url).is_err() {
            anyhow::bail!("SERPAPI_URL is not a valid URL: {}", self.serpapi_url);
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
