//! REPL runner: converts teloxide messages to core messages, runs them
//! through the handler chain, and delivers the replies.

use std::sync::Arc;

use anyhow::Result;
use ridebot_chain::HandlerChain;
use ridebot_core::{Bot as CoreBot, HandlerResponse, Message as CoreMessage};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::sender::TelegramSender;

/// Starts the REPL with the given teloxide Bot and HandlerChain. Each text
/// message is converted to a core message and handled in a spawned task so
/// the REPL keeps polling; replies from the chain are sent back to the chat.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let sender = Arc::new(TelegramSender::new(bot.clone()));

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        let sender = sender.clone();

        async move {
            let Some(text) = msg.text() else {
                info!(chat_id = msg.chat.id.0, "Received non-text message");
                return Ok(());
            };

            let core_msg = CoreMessage::new(msg.chat.id.0, text);
            info!(
                chat_id = core_msg.chat_id,
                message_content = %text,
                "Received message"
            );

            // Handle in a spawned task so the REPL returns immediately.
            tokio::spawn(async move {
                match chain.handle(&core_msg).await {
                    Ok(HandlerResponse::Replies(replies)) => {
                        if let Err(e) = sender.send_all(core_msg.chat_id, &replies).await {
                            error!(
                                error = %e,
                                chat_id = core_msg.chat_id,
                                "Failed to deliver replies"
                            );
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, chat_id = core_msg.chat_id, "Handler chain failed");
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
