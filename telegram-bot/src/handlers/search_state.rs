//! Per-session web-search flow: Idle or waiting for the query after a bare `/websearch`.

use std::collections::HashMap;

use tokio::sync::Mutex;

/// Where a session is in the web-search flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    AwaitingQuery,
}

/// Inbound event as seen by the search flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent<'a> {
    /// `/websearch`, with the joined arguments if any.
    Command(Option<&'a str>),
    /// Free text.
    Text(&'a str),
    /// Anything else.
    Other,
}

/// What the handler should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Search(String),
    PromptForQuery,
    /// Not a search event; let the rest of the chain handle it.
    Pass,
}

impl SearchState {
    /// Transition table. Blank queries count as missing.
    pub fn next(self, event: SearchEvent<'_>) -> (SearchState, SearchAction) {
        let non_blank = |q: &str| {
            let q = q.trim();
            (!q.is_empty()).then(|| q.to_string())
        };
        match (self, event) {
            (_, SearchEvent::Command(query)) => match query.and_then(non_blank) {
                Some(q) => (SearchState::Idle, SearchAction::Search(q)),
                None => (SearchState::AwaitingQuery, SearchAction::PromptForQuery),
            },
            (SearchState::AwaitingQuery, SearchEvent::Text(text)) => match non_blank(text) {
                Some(q) => (SearchState::Idle, SearchAction::Search(q)),
                None => (SearchState::AwaitingQuery, SearchAction::PromptForQuery),
            },
            (state, _) => (state, SearchAction::Pass),
        }
    }
}

/// Owned map of session id to [`SearchState`]. Missing entries are Idle.
#[derive(Debug, Default)]
pub struct SearchStates {
    states: Mutex<HashMap<i64, SearchState>>,
}

impl SearchStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, session_id: i64) -> SearchState {
        self.states
            .lock()
            .await
            .get(&session_id)
            .copied()
            .unwrap_or_default()
    }

    /// Applies `event` to the session's state atomically and returns the action to take.
    pub async fn apply(&self, session_id: i64, event: SearchEvent<'_>) -> SearchAction {
        let mut states = self.states.lock().await;
        let current = states.get(&session_id).copied().unwrap_or_default();
        let (next, action) = current.next(event);
        if next == SearchState::Idle {
            states.remove(&session_id);
        } else {
            states.insert(session_id, next);
        }
        action
    }
}
