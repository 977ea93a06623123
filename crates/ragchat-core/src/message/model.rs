//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, monotonically orderable identifier for one message.
///
/// Derived from the creation time in milliseconds; `seq` breaks ties between
/// messages created within the same millisecond. Ordering is lexicographic on
/// `(created_ms, seq)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId {
    created_ms: i64,
    seq: u32,
}

impl MessageId {
    pub const fn new(created_ms: i64, seq: u32) -> Self {
        Self { created_ms, seq }
    }

    pub const fn created_ms(&self) -> i64 {
        self.created_ms
    }

    pub const fn seq(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.created_ms, self.seq)
    }
}

/// Who authored a message. Determines the side it renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// Delivery state of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    Delivered,
    /// The responder failed; the message text is the failure notice.
    Failed { reason: String },
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: MessageStatus,
    /// For assistant replies, the user message that triggered them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<MessageId>,
}

impl Message {
    pub fn new(
        id: MessageId,
        origin: Origin,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            origin,
            created_at,
            status: MessageStatus::Delivered,
            reply_to: None,
        }
    }

    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = status;
        self
    }

    pub fn replying_to(mut self, trigger: MessageId) -> Self {
        self.reply_to = Some(trigger);
        self
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, MessageStatus::Failed { .. })
    }
}
