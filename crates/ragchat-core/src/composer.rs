//! Draft input and the send action.

use crate::error::Result;
use crate::message::{Message, MessageStatus, MessageStore, Origin};

/// Holds the in-progress, uncommitted text of the message input.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    draft: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the draft buffer. No validation happens per keystroke.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether `commit` would append anything.
    pub fn is_sendable(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// Commits the draft into `store` as a user message.
    ///
    /// A blank draft is a silent no-op: the store and the draft are left
    /// untouched and `Ok(None)` is returned. Otherwise the trimmed text is
    /// appended and the draft is cleared only after the append succeeded.
    pub fn commit(&mut self, store: &mut MessageStore) -> Result<Option<Message>> {
        let text = self.draft.trim();
        if text.is_empty() {
            tracing::debug!("[Composer] ignoring blank draft");
            return Ok(None);
        }

        let message = store
            .record(Origin::User, text, MessageStatus::Delivered, None)?
            .clone();
        self.draft.clear();
        Ok(Some(message))
    }
}
