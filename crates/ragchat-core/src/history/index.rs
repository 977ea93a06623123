use super::model::HistoryEntry;

/// Snapshot of history entries shown in the drawer, newest first.
///
/// While frozen (the drawer is open) a replacement snapshot is staged instead
/// of applied, so rows never move under the user's finger. Thawing applies
/// the most recent staged snapshot. The first snapshot is always applied
/// immediately, so a drawer opened before history loaded still fills in.
#[derive(Debug, Clone, Default)]
pub struct HistoryIndex {
    entries: Vec<HistoryEntry>,
    staged: Option<Vec<HistoryEntry>>,
    frozen: bool,
    loaded: bool,
}

impl HistoryIndex {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        let mut index = Self::default();
        index.replace(entries);
        index
    }

    /// Installs a new snapshot, or stages it while frozen.
    pub fn replace(&mut self, mut entries: Vec<HistoryEntry>) {
        // Stable: entries sharing a date keep their provider order.
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        if self.frozen && self.loaded {
            tracing::debug!("[HistoryIndex] staging {} entries while frozen", entries.len());
            self.staged = Some(entries);
        } else {
            self.entries = entries;
            self.loaded = true;
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn thaw(&mut self) {
        self.frozen = false;
        if let Some(staged) = self.staged.take() {
            tracing::debug!("[HistoryIndex] applying {} staged entries", staged.len());
            self.entries = staged;
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose title contains `query`, ignoring case. A blank query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, title: &str, day: u32) -> HistoryEntry {
        HistoryEntry::new(id, title, Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap())
    }

    fn titles(index: &HistoryIndex) -> Vec<&str> {
        index.list().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_newest_first_and_stable_for_ties() {
        let index = HistoryIndex::new(vec![
            entry("1", "Document analysis", 2),
            entry("2", "Research help", 2),
            entry("3", "Old chat", 1),
            entry("4", "Latest", 3),
        ]);
        assert_eq!(
            titles(&index),
            vec!["Latest", "Document analysis", "Research help", "Old chat"]
        );
    }

    #[test]
    fn test_replace_while_frozen_is_deferred() {
        let mut index = HistoryIndex::new(vec![entry("1", "Document analysis", 1)]);
        index.freeze();
        index.replace(vec![entry("2", "Research help", 2), entry("1", "Document analysis", 1)]);
        assert_eq!(titles(&index), vec!["Document analysis"]);

        index.thaw();
        assert!(!index.is_frozen());
        assert_eq!(titles(&index), vec!["Research help", "Document analysis"]);
    }

    #[test]
    fn test_first_snapshot_applies_while_frozen() {
        let mut index = HistoryIndex::default();
        index.freeze();
        index.replace(vec![entry("1", "Document analysis", 1), entry("2", "Research help", 2)]);
        assert_eq!(titles(&index), vec!["Research help", "Document analysis"]);

        // Later snapshots are held back as usual
        index.replace(vec![entry("3", "Latest", 3)]);
        assert_eq!(index.len(), 2);
        index.thaw();
        assert_eq!(titles(&index), vec!["Latest"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = HistoryIndex::new(vec![
            entry("1", "Document analysis", 2),
            entry("2", "Research help", 1),
        ]);
        let hits: Vec<&str> = index.search("RESEARCH").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(hits, vec!["2"]);
        assert_eq!(index.search("  ").len(), 2);
        assert!(index.search("nothing").is_empty());
        assert_eq!(index.get("1").unwrap().title, "Document analysis");
    }
}
