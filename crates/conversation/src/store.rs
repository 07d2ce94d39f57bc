//! Owned session → history map with one lock per session.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::{PromptMode, SessionId, TurnBuffer};

/// Shared handle to one session's buffer. Holding the lock serializes exchanges for that session.
pub type SessionHandle = Arc<Mutex<TurnBuffer>>;

/// In-memory history for all sessions.
///
/// Sessions are created lazily and never removed. Different sessions share nothing but the map,
/// whose lock is held only to look up or insert a handle.
#[derive(Debug)]
pub struct HistoryStore {
    window: usize,
    mode: PromptMode,
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl HistoryStore {
    pub fn new(window: usize, mode: PromptMode) -> Self {
        Self {
            window,
            mode,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    /// Returns the lock handle for `session_id`, creating an empty buffer on first use.
    pub async fn session(&self, session_id: SessionId) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(&session_id) {
            return handle.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id)
            .or_insert_with(|| {
                debug!(session_id, window = self.window, "Creating session history");
                Arc::new(Mutex::new(TurnBuffer::new(self.window)))
            })
            .clone()
    }

    /// Returns a snapshot of the session's turn contents (empty for a new session).
    pub async fn get_or_create(&self, session_id: SessionId) -> Vec<String> {
        let handle = self.session(session_id).await;
        let buffer = handle.lock().await;
        buffer.contents()
    }

    /// Renders the prompt for `user_message` against the current history. Does not mutate.
    pub async fn render_prompt(&self, session_id: SessionId, user_message: &str) -> String {
        let handle = self.session(session_id).await;
        let buffer = handle.lock().await;
        buffer.render_prompt(self.mode, user_message)
    }

    /// Appends one exchange (both turns under one lock) and evicts down to the cap.
    pub async fn commit(&self, session_id: SessionId, user_message: &str, assistant_message: &str) {
        let handle = self.session(session_id).await;
        let mut buffer = handle.lock().await;
        buffer.push_exchange(user_message, assistant_message);
    }

    /// Resets the session's history to empty. Idempotent.
    pub async fn clear(&self, session_id: SessionId) {
        let handle = self.session(session_id).await;
        handle.lock().await.clear();
    }

    /// Number of sessions seen so far.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(crate::DEFAULT_WINDOW, PromptMode::default())
    }
}
