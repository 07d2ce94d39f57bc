//! # Telegram bot application
//!
//! Core types (Handler, Bot, Message), the handler chain, config, inbound handlers and the
//! teloxide layer. Chat goes through the `conversation` crate; images, PDFs and web search
//! call the gateways directly.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, Bot, Chat, DbotError, Handler, HandlerResponse, Message,
    MessagePayload, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use config::BotConfig;
pub use runner::run_bot;

pub use components::{build_bot_components, build_handler_chain, build_teloxide_bot, BotComponents};
pub use handlers::{
    ChatHandler, CommandHandler, ContactHandler, DocumentHandler, FallbackHandler, ImageHandler,
    LoggingHandler, SearchState, SearchStates, WebSearchHandler,
};
