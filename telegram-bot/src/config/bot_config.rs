//! BotConfig: BaseConfig + LLM, conversation and search configs. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{BaseConfig, ConversationConfig, SearchConfig};

/// Bot config. Use BotConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub conversation: ConversationConfig,
    pub search: SearchConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let conversation = ConversationConfig::from_env()?;
        let search = SearchConfig::from_env()?;
        Ok(Self {
            base,
            llm,
            conversation,
            search,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.conversation.validate()?;
        self.search.validate()?;
        if reqwest::Url::parse(self.llm.base_url()).is_err() {
            anyhow::bail!("LLM_BASE_URL is not a valid URL: {}", self.llm.base_url());
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn llm_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.llm.timeout_secs())
    }
}
