//! Per-session turn buffer.

use prompt::{format_conversation_prompt, render_history, ChatMessage};
use std::collections::VecDeque;

use crate::PromptMode;

/// Ordered turns for one session. Holds at most `2 × window` turns.
///
/// Eviction is by raw turn, oldest first. Turns are only ever added in user/assistant pairs and the
/// cap is even, so the front of the buffer always starts with a user turn. Each turn keeps its role,
/// so rendering never depends on position parity.
#[derive(Debug, Clone)]
pub struct TurnBuffer {
    turns: VecDeque<ChatMessage>,
    max_turns: usize,
}

impl TurnBuffer {
    /// Creates an empty buffer retaining `window` exchanges.
    pub fn new(window: usize) -> Self {
        let max_turns = window.saturating_mul(2);
        Self {
            turns: VecDeque::with_capacity(max_turns.min(64)),
            max_turns,
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns in chronological order.
    pub fn turns(&self) -> impl Iterator<Item = &ChatMessage> {
        self.turns.iter()
    }

    /// Turn contents in chronological order.
    pub fn contents(&self) -> Vec<String> {
        self.turns.iter().map(|t| t.content.clone()).collect()
    }

    /// Renders the last `2 × window` turns as labeled lines.
    pub fn render_history(&self) -> String {
        let skip = self.turns.len().saturating_sub(self.max_turns);
        render_history(self.turns.iter().skip(skip))
    }

    /// Renders the full prompt for `user_message`. Does not mutate.
    pub fn render_prompt(&self, mode: PromptMode, user_message: &str) -> String {
        match mode {
            PromptMode::HistoryAware => {
                format_conversation_prompt(&self.render_history(), user_message)
            }
            PromptMode::Stateless => user_message.to_string(),
        }
    }

    /// Appends the user turn then the assistant turn, then evicts from the front down to the cap.
    pub fn push_exchange(&mut self, user_message: impl Into<String>, assistant_message: impl Into<String>) {
        self.turns.push_back(ChatMessage::user(user_message));
        self.turns.push_back(ChatMessage::assistant(assistant_message));
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
