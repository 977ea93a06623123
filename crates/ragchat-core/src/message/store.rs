//! Append-only message log.

use super::model::{Message, MessageId, MessageStatus, Origin};
use crate::error::{ChatError, Result};
use chrono::{DateTime, Utc};

/// Ordered log of chat turns; the single source of truth for a thread.
///
/// Insertion order is rendering order. Messages are never edited, reordered,
/// or removed once appended, and their ids are strictly increasing.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    /// Highest id handed out by `next_id`, appended or not.
    high_water: Option<MessageId>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next message id for a message created at `at`.
    ///
    /// Ids never go backwards, even if the wall clock does.
    pub fn next_id(&mut self, at: DateTime<Utc>) -> MessageId {
        let millis = at.timestamp_millis();
        let id = match self.high_water {
            Some(last) if millis <= last.created_ms() => match last.seq().checked_add(1) {
                Some(seq) => MessageId::new(last.created_ms(), seq),
                None => MessageId::new(last.created_ms() + 1, 0),
            },
            _ => MessageId::new(millis, 0),
        };
        self.high_water = Some(id);
        id
    }

    /// Appends a message at the tail of the log.
    ///
    /// # Errors
    ///
    /// - `Validation` if a user message has blank text
    /// - `Internal` if the id does not sort after the current tail
    pub fn append(&mut self, message: Message) -> Result<&Message> {
        if message.origin == Origin::User && message.text.trim().is_empty() {
            return Err(ChatError::validation("user message text is blank"));
        }

        if let Some(last) = self.messages.last() {
            if message.id <= last.id {
                return Err(ChatError::internal(format!(
                    "message id {} does not follow tail id {}",
                    message.id, last.id
                )));
            }
        }

        if self.high_water.is_none_or(|hw| message.id > hw) {
            self.high_water = Some(message.id);
        }

        tracing::debug!(
            "[MessageStore] append id={} origin={:?} len={}",
            message.id,
            message.origin,
            self.messages.len() + 1
        );
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Creates a message timestamped now and appends it.
    pub fn record(
        &mut self,
        origin: Origin,
        text: impl Into<String>,
        status: MessageStatus,
        reply_to: Option<MessageId>,
    ) -> Result<&Message> {
        let now = Utc::now();
        let id = self.next_id(now);
        let mut message = Message::new(id, origin, text, now).with_status(status);
        message.reply_to = reply_to;
        self.append(message)
    }

    /// The full thread in rendering order.
    pub fn list(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|idx| &self.messages[idx])
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Up to `limit` messages immediately preceding `id`, oldest first.
    pub fn preceding(&self, id: MessageId, limit: usize) -> Vec<Message> {
        let end = self.messages.partition_point(|m| m.id < id);
        let start = end.saturating_sub(limit);
        self.messages[start..end].to_vec()
    }
}
