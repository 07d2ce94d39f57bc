//! User-facing reply texts.

pub const REQUEST_CONTACT: &str = "Please share your contact number:";
pub const SHARE_CONTACT_BUTTON: &str = "Share Contact";
pub const WELCOME_BACK: &str = "Welcome back!";
pub const CONTACT_SAVED: &str = "Thank you! Your phone number has been registered.";
pub const HISTORY_CLEARED: &str = "Conversation history has been cleared.";
pub const SEARCH_PROMPT: &str =
    "Please send your search query. You can also use: /websearch your query here";
pub const SEARCH_NOT_CONFIGURED: &str = "Web search is not configured.";
pub const NO_SEARCH_RESULTS: &str = "No search results found.";
pub const UNSUPPORTED_FILE: &str = "Unsupported file type.";
pub const EMPTY_DOCUMENT: &str = "I couldn't find any extractable text in this PDF.";
pub const EMPTY_REPLY: &str = "Sorry, I couldn't come up with a response. Please try rephrasing.";
pub const UNSUPPORTED_MESSAGE: &str =
    "Sorry, I can't handle this kind of message. Send /help to see what I can do.";

pub const HELP_TEXT: &str = "Here are the available commands and how to use the bot:\n\n\
/start - Register yourself with the bot and share your contact number.\n\
/help - Display this help message.\n\
/clear - Clear chat history.\n\
/websearch - Perform a web search and get an AI-generated summary with top web links.\n\n\
Other interactions:\n\
- Send any text message to chat with the AI.\n\
- Send an image (JPG, PNG) to get an AI description of its content.\n\
- Send a PDF file to get an AI-generated summary.\n";

/// Text to send for a model reply; a blank reply becomes [`EMPTY_REPLY`].
pub fn model_reply(text: &str) -> &str {
    if text.trim().is_empty() {
        EMPTY_REPLY
    } else {
        text
    }
}

pub fn searching(query: &str) -> String {
    format!("🔍 Searching the web for: {}", query)
}

pub fn unknown_command(name: &str) -> String {
    format!("Unknown command /{}. Send /help to see what I can do.", name)
}

pub fn generation_failed(error: &dyn std::fmt::Display) -> String {
    format!("Sorry, I couldn't generate a response: {}", error)
}

pub fn image_failed(error: &dyn std::fmt::Display) -> String {
    format!("Sorry, I couldn't process this image: {}", error)
}

pub fn document_failed(error: &dyn std::fmt::Display) -> String {
    format!("Sorry, I couldn't process this document: {}", error)
}

pub fn search_failed(error: &dyn std::fmt::Display) -> String {
    format!("An error occurred while processing your search: {}", error)
}
