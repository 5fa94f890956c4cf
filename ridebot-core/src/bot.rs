//! Bot abstraction for delivering outbound messages.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in
//! ridebot-telegram so this crate never links a transport stack.

use crate::error::Result;
use crate::types::OutboundMessage;
use async_trait::async_trait;

/// Abstraction for sending messages to a chat. Implementations map to a
/// transport (e.g. Telegram); tests can substitute a recording impl.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Delivers one outbound message to the given chat, honoring its
    /// rich-text hint where the transport supports it.
    async fn send(&self, chat_id: i64, message: &OutboundMessage) -> Result<()>;

    /// Delivers a batch in order. Default: one `send` per message.
    async fn send_all(&self, chat_id: i64, messages: &[OutboundMessage]) -> Result<()> {
        for message in messages {
            self.send(chat_id, message).await?;
        }
        Ok(())
    }
}
