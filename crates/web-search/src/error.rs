use thiserror::Error;

/// Errors from the search gateway.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search API error: {0}")]
    Api(String),

    #[error("Search is not configured")]
    NotConfigured,
}
