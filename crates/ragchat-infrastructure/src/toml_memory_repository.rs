//! TOML-backed memory persistence.

use crate::dto::{MemoryFileV1, MemoryV1, ensure_version};
use crate::paths::RagChatPaths;
use crate::storage::TomlFile;
use async_trait::async_trait;
use ragchat_core::config::StorageConfig;
use ragchat_core::error::{ChatError, Result};
use ragchat_core::memory::{Memory, MemoryProvider};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Stores every memory in a single `memories.toml`.
///
/// Writes are serialized through a mutex so concurrent saves and deletes
/// cannot lose each other's updates.
pub struct TomlMemoryRepository {
    file: TomlFile<MemoryFileV1>,
    write_lock: Mutex<()>,
}

impl TomlMemoryRepository {
    /// Creates a repository at the default data path.
    pub fn new(storage: &StorageConfig) -> Result<Self> {
        Ok(Self::with_path(RagChatPaths::memories_file(storage)?))
    }

    /// Creates a repository backed by `path` (used by tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: TomlFile::new(path),
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<MemoryFileV1> {
        match self.file.load().await? {
            Some(document) => {
                ensure_version("memories.toml", document.version, MemoryFileV1::VERSION)?;
                Ok(document)
            }
            None => Ok(MemoryFileV1::default()),
        }
    }
}

#[async_trait]
impl MemoryProvider for TomlMemoryRepository {
    async fn load_memories(&self) -> Result<Vec<Memory>> {
        let document = self.read().await?;
        Ok(document.memories.into_iter().map(Memory::from).collect())
    }

    async fn save_memory(&self, memory: &Memory) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        let dto = MemoryV1::from(memory);
        match document.memories.iter_mut().find(|m| m.id == memory.id) {
            Some(existing) => *existing = dto,
            None => document.memories.push(dto),
        }

        self.file.save(&document).await?;
        tracing::info!("[TomlMemoryRepository] saved memory id={}", memory.id);
        Ok(())
    }

    async fn delete_memory(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        let before = document.memories.len();
        document.memories.retain(|m| m.id != id);
        if document.memories.len() == before {
            return Err(ChatError::not_found("Memory", id));
        }

        self.file.save(&document).await?;
        tracing::info!("[TomlMemoryRepository] deleted memory id={}", id);
        Ok(())
    }
}
