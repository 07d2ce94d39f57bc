//! Exchange orchestration: render, call the inference gateway with a timeout, commit on success.

use llm_client::LlmClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::{ConversationError, HistoryStore, PromptMode, SessionId};

/// Result of one successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Full prompt sent to the model.
    pub prompt: String,
    /// Rendered history used in the prompt (empty when there was none).
    pub context: String,
    /// Model reply, already committed to history.
    pub reply: String,
}

/// Runs exchanges against a [`HistoryStore`] and an [`LlmClient`].
///
/// The session lock is held from render through commit, so at most one exchange per session is in
/// flight. A failed or timed-out call leaves the history untouched.
pub struct ConversationManager {
    history: Arc<HistoryStore>,
    llm: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl ConversationManager {
    pub fn new(history: Arc<HistoryStore>, llm: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self {
            history,
            llm,
            timeout,
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    #[instrument(skip(self, user_message), fields(message_len = user_message.len()))]
    pub async fn exchange(
        &self,
        session_id: SessionId,
        user_message: &str,
    ) -> Result<Exchange, ConversationError> {
        let handle = self.history.session(session_id).await;
        let mut buffer = handle.lock().await;

        let context = match self.history.mode() {
            PromptMode::HistoryAware => buffer.render_history(),
            PromptMode::Stateless => String::new(),
        };
        let prompt = buffer.render_prompt(self.history.mode(), user_message);
        info!(
            session_id,
            history_turns = buffer.len(),
            prompt_len = prompt.len(),
            "step: conversation exchange, calling model"
        );

        let reply = match tokio::time::timeout(self.timeout, self.llm.generate(&prompt)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                error!(session_id, error = %e, "Model call failed, history unchanged");
                return Err(ConversationError::Generation(e.to_string()));
            }
            Err(_) => {
                error!(session_id, timeout = ?self.timeout, "Model call timed out, history unchanged");
                return Err(ConversationError::Timeout(self.timeout));
            }
        };

        buffer.push_exchange(user_message, reply.clone());
        info!(
            session_id,
            history_turns = buffer.len(),
            reply_len = reply.len(),
            "step: conversation exchange committed"
        );

        Ok(Exchange {
            prompt,
            context,
            reply,
        })
    }

    /// Resets the session's history.
    pub async fn clear(&self, session_id: SessionId) {
        self.history.clear(session_id).await;
        info!(session_id, "Conversation history cleared");
    }
}
