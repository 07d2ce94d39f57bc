//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Default OpenAI-compatible endpoint for the hosted Gemini models.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Default timeout for one inference call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn system_prompt(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_system_prompt: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.llm_api_key
    }
    fn base_url(&self) -> &str {
        &self.llm_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn timeout_secs(&self) -> u64 {
        self.llm_timeout_secs
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. `LLM_API_KEY` or `GEMINI_API_KEY` is required.
    pub fn from_env() -> Result<Self> {
        let llm_api_key = env::var("LLM_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .context("LLM_API_KEY or GEMINI_API_KEY not set")?;
        let llm_base_url =
            env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .with_context(|| format!("LLM_TIMEOUT_SECS must be a positive number: {}", v))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        let llm_system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self {
            llm_api_key,
            llm_base_url,
            llm_model,
            llm_timeout_secs,
            llm_system_prompt,
        })
    }
}
