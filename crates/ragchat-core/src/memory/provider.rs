use super::model::Memory;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence collaborator for memories.
#[async_trait]
pub trait MemoryProvider: Send + Sync {
    /// Loads all memories in display order.
    async fn load_memories(&self) -> Result<Vec<Memory>>;

    /// Inserts `memory`, or replaces the stored memory with the same id.
    async fn save_memory(&self, memory: &Memory) -> Result<()>;

    /// Deletes the memory with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no memory has that id.
    async fn delete_memory(&self, id: &str) -> Result<()>;
}
