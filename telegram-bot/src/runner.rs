//! Main entry: init logging, validate config, build components and chain, then run the REPL.

use anyhow::Result;
use openai_client::mask_token;
use tracing::{info, instrument};

use super::components::{build_bot_components, build_handler_chain, build_teloxide_bot};
use super::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::run_repl;

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        bot_token = %mask_token(config.bot_token()),
        history_window = config.conversation.window,
        history_aware = config.conversation.history_aware,
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config);
    let components = build_bot_components(&config, teloxide_bot.clone()).await?;
    let handler_chain = build_handler_chain(&components);

    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_repl(teloxide_bot, handler_chain).await
}
