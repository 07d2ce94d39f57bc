//! # Prompt
//!
//! Formats conversation history and fixed instructions into prompt strings for the model.
//!
//! ## Format
//!
//! History-aware prompt:
//!
//! ```text
//! Previous conversation:
//! User: {turn}
//! Assistant: {turn}
//!
//! User: {new message}
//!
//! Please provide a response that takes into account the conversation history above.
//! ```
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to the inference gateway as a single user message.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// Label used when rendering a turn as a prompt line.
    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::System => "System",
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        }
    }
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// Renders as `"{Role}: {content}"`.
    pub fn to_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

/// Header placed before the rendered history.
pub const HISTORY_HEADER: &str = "Previous conversation:";

/// Instruction appended after the new user message in history-aware prompts.
pub const HISTORY_INSTRUCTION: &str =
    "Please provide a response that takes into account the conversation history above.";

/// Instruction sent alongside an image.
pub const IMAGE_INSTRUCTION: &str = "Describe this image.";

/// Prefix for document summaries; the extracted text follows.
pub const DOCUMENT_INSTRUCTION: &str = "Summarize the following document:";

/// Renders turns as labeled lines in the given order, joined with `\n`.
pub fn render_history<'a, I>(turns: I) -> String
where
    I: IntoIterator<Item = &'a ChatMessage>,
{
    turns
        .into_iter()
        .map(ChatMessage::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the history-aware prompt from already rendered history and the new user message.
///
/// An empty `history` still yields the header; the new message is always present.
pub fn format_conversation_prompt(history: &str, user_message: &str) -> String {
    let mut out = String::new();
    out.push_str(HISTORY_HEADER);
    out.push('\n');
    if !history.is_empty() {
        out.push_str(history);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(MessageRole::User.label());
    out.push_str(": ");
    out.push_str(user_message);
    out.push_str("\n\n");
    out.push_str(HISTORY_INSTRUCTION);
    out
}

/// Builds the document summary prompt.
pub fn format_document_prompt(text: &str) -> String {
    format!("{} {}", DOCUMENT_INSTRUCTION, text)
}
