//! The seam where an answering backend attaches.

use crate::error::Result;
use crate::message::Message;
use async_trait::async_trait;

/// Everything a responder gets to answer one committed user message.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyRequest {
    /// Commit-order position of the triggering message within its session.
    pub sequence: u64,
    /// The user message being answered.
    pub message: Message,
    /// Messages preceding `message`, oldest first, captured at commit time.
    pub context: Vec<Message>,
}

/// Produces the assistant's reply text for a committed user message.
///
/// Implementations may suspend for as long as they need. The session turns
/// the returned text into exactly one assistant message; an `Err` (usually
/// `ChatError::Responder`) becomes a failed assistant message instead.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, request: &ReplyRequest) -> Result<String>;
}

/// Answers every message with the same fixed text.
#[derive(Debug, Clone)]
pub struct PlaceholderResponder {
    reply: String,
}

impl PlaceholderResponder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for PlaceholderResponder {
    fn default() -> Self {
        Self::new("Processing your request...")
    }
}

#[async_trait]
impl Responder for PlaceholderResponder {
    async fn respond(&self, request: &ReplyRequest) -> Result<String> {
        tracing::debug!(
            "[PlaceholderResponder] answering sequence={} id={}",
            request.sequence,
            request.message.id
        );
        Ok(self.reply.clone())
    }
}
