//! Core types: inbound/outbound messages, handler response, Handler and Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inbound text message, reduced to what the dialogue needs: the chat it
/// came from and its text. Envelope fields (usernames, reply context, markup)
/// stay in the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub chat_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message timestamped now.
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// One outbound reply. `markdown` asks the transport to render rich text;
/// set on messages that display tabular entity data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    pub markdown: bool,
}

impl OutboundMessage {
    /// Plain-text reply.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
        }
    }

    /// Rich-text reply (entity cards).
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
        }
    }
}

/// Handler result for the chain. `Replies` carries the outbound messages so
/// later handlers and middleware `after()` hooks can see what is being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing to send.
    Stop,
    /// Stop the chain and send these messages in order.
    Replies(Vec<OutboundMessage>),
}

/// Single handler concept: optional before / handle / after. The chain runs
/// all before hooks, then handlers until the first Stop/Replies, then after
/// hooks in reverse.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Replies to end the handle phase.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Cross-cutting hooks around the whole handler phase. `before` in order,
/// `after` in reverse order of registration.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Return false to stop the chain before any handler runs.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Observes the final response after the handler phase.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
