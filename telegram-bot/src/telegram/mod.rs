//! Telegram framework layer: adapters, Bot implementation, REPL runner.

mod adapters;
mod bot_adapter;
mod runner;
mod split;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_repl;
pub use split::{split_message, TELEGRAM_MESSAGE_LIMIT};
