//! Middleware that logs each message and the final chain response.

use async_trait::async_trait;
use ridebot_core::{HandlerResponse, Message, Middleware, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            chat_id = message.chat_id,
            message_content = %message.text,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let reply_count = match response {
            HandlerResponse::Replies(replies) => replies.len(),
            _ => 0,
        };
        debug!(
            chat_id = message.chat_id,
            response = ?response,
            reply_count,
            "Processed message"
        );
        Ok(())
    }
}
