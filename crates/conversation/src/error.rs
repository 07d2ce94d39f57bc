//! Errors from a conversation exchange. The buffer itself never fails.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}
