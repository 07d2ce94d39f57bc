//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat (private or group) identity. `id` is the session id for history and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}
