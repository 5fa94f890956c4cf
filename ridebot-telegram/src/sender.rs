//! Wraps teloxide::Bot and implements [`ridebot_core::Bot`]. Production code
//! sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use ridebot_core::{Bot as CoreBot, OutboundMessage, Result, RideError};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

/// Thin wrapper around teloxide::Bot that implements the core Bot trait.
pub struct TelegramSender {
    bot: teloxide::Bot,
}

impl TelegramSender {
    /// Creates a sender from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramSender {
    async fn send(&self, chat_id: i64, message: &OutboundMessage) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), message.text.clone());
        if message.markdown {
            request = request.parse_mode(ParseMode::Markdown);
        }
        request
            .await
            .map_err(|e| RideError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_wraps_bot() {
        let sender = TelegramSender::new(teloxide::Bot::new("dummy_token"));
        let _ = sender.inner();
    }
}
