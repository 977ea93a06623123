use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a past conversation, as listed in the history drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Human-readable summary of the conversation.
    pub title: String,
    pub date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
        }
    }

    /// Short date label, e.g. `3/14/2025`.
    pub fn date_label(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }
}
