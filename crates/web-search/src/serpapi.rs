//! SerpAPI client (Google engine).

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::{SearchClient, SearchError, SearchResult};

/// Production SerpAPI endpoint.
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// SerpAPI-backed [`SearchClient`]. Results are requested in English, US region, newest first.
#[derive(Clone)]
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    /// `base_url` is [`DEFAULT_SERPAPI_URL`] in production or a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }
}

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SearchResult>,
    error: Option<String>,
}

#[async_trait]
impl SearchClient for SerpApiClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::NotConfigured);
        }
        let num = top_k.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("hl", "en"),
                ("gl", "us"),
                ("num", num.as_str()),
                ("sort", "date"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "SerpAPI returned non-success status");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: SerpApiResponse = response.json().await?;
        if let Some(message) = body.error {
            // SerpAPI reports "no results" as an error string with status 200.
            if message.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(SearchError::Api(message));
        }

        let mut results = body.organic_results;
        results.truncate(top_k);
        info!(count = results.len(), "SerpAPI search returned");
        Ok(results)
    }
}
