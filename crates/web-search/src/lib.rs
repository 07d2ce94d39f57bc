//! # Web search
//!
//! [`SearchClient`] is the search gateway used by `/websearch`. [`SerpApiClient`] implements it
//! against SerpAPI's Google engine. [`format`] turns results into the summary prompt and the reply.

mod error;
pub mod format;
mod serpapi;

pub use error::SearchError;
pub use serpapi::{SerpApiClient, DEFAULT_SERPAPI_URL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One organic search result. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub date: String,
}

/// Search gateway. An empty result list is a normal outcome, not an error.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, SearchError>;
}
