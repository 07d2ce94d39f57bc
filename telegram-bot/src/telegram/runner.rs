//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL with the given teloxide Bot and HandlerChain.
/// Each message is converted to core::Message and handled in its own task, so chats proceed
/// independently; same-chat exchanges are serialized by the conversation manager.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                kind = core_msg.payload.kind(),
                "Received update"
            );

            // Run handler chain in a spawned task so REPL returns immediately
            tokio::spawn(async move {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "step: processing message (handler chain started)"
                );
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
