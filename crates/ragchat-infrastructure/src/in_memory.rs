//! In-process collaborator implementations.
//!
//! Useful for previews, the terminal driver, and tests. Nothing here
//! survives a restart.

use crate::fixtures;
use async_trait::async_trait;
use ragchat_core::error::{ChatError, Result};
use ragchat_core::history::{HistoryEntry, HistoryProvider};
use ragchat_core::memory::{Memory, MemoryProvider};
use ragchat_core::settings::{Settings, SettingsRepository};
use tokio::sync::RwLock;

/// Serves a fixed list of history entries.
#[derive(Debug, Clone, Default)]
pub struct StaticHistoryProvider {
    entries: Vec<HistoryEntry>,
}

impl StaticHistoryProvider {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Provider seeded with the sample conversations.
    pub fn with_samples() -> Self {
        Self::new(fixtures::sample_history())
    }
}

#[async_trait]
impl HistoryProvider for StaticHistoryProvider {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.clone())
    }
}

/// Memory store kept in a vector, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMemoryRepository {
    memories: RwLock<Vec<Memory>>,
}

impl InMemoryMemoryRepository {
    pub fn new(memories: Vec<Memory>) -> Self {
        Self {
            memories: RwLock::new(memories),
        }
    }

    /// Repository seeded with the sample memories.
    pub fn with_samples() -> Self {
        Self::new(fixtures::sample_memories())
    }
}

#[async_trait]
impl MemoryProvider for InMemoryMemoryRepository {
    async fn load_memories(&self) -> Result<Vec<Memory>> {
        Ok(self.memories.read().await.clone())
    }

    async fn save_memory(&self, memory: &Memory) -> Result<()> {
        let mut memories = self.memories.write().await;
        match memories.iter_mut().find(|m| m.id == memory.id) {
            Some(existing) => *existing = memory.clone(),
            None => memories.push(memory.clone()),
        }
        Ok(())
    }

    async fn delete_memory(&self, id: &str) -> Result<()> {
        let mut memories = self.memories.write().await;
        let position = memories
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ChatError::not_found("Memory", id))?;
        memories.remove(position);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<Settings>,
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load_settings(&self) -> Result<Settings> {
        Ok(*self.settings.read().await)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        *self.settings.write().await = *settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragchat_core::memory::MemoryIcon;

    #[tokio::test]
    async fn test_sample_history() {
        let provider = StaticHistoryProvider::with_samples();
        let titles: Vec<String> = provider
            .load_history()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Document analysis", "Research help"]);
    }

    #[tokio::test]
    async fn test_memory_upsert_and_delete() {
        let repo = InMemoryMemoryRepository::with_samples();
        assert_eq!(repo.load_memories().await.unwrap().len(), 5);

        let edited = Memory::new("2", "Project Ideas", "Events app", MemoryIcon::Lightbulb);
        repo.save_memory(&edited).await.unwrap();
        let added = Memory::new("6", "Reading list", "Books", MemoryIcon::Note);
        repo.save_memory(&added).await.unwrap();

        let memories = repo.load_memories().await.unwrap();
        assert_eq!(memories.len(), 6);
        assert_eq!(memories[1].content, "Events app");
        assert_eq!(memories[5].id, "6");

        repo.delete_memory("1").await.unwrap();
        assert!(repo.delete_memory("1").await.unwrap_err().is_not_found());
        assert_eq!(repo.load_memories().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_settings_default_then_saved() {
        let repo = InMemorySettingsRepository::default();
        assert_eq!(repo.load_settings().await.unwrap(), Settings::default());

        let settings = Settings {
            dark_mode: false,
            notifications_enabled: true,
        };
        repo.save_settings(&settings).await.unwrap();
        assert_eq!(repo.load_settings().await.unwrap(), settings);
    }
}
