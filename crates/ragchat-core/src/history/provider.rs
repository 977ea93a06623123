use super::model::HistoryEntry;
use crate::error::Result;
use async_trait::async_trait;

/// Source of past conversation summaries.
///
/// Read-only from the chat core's point of view: nothing in a live session
/// writes history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Loads every history entry.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` when the backing store cannot be read.
    async fn load_history(&self) -> Result<Vec<HistoryEntry>>;
}
