//! Memory DTOs

use ragchat_core::memory::{Memory, MemoryIcon};
use serde::{Deserialize, Serialize};

/// One `[[memories]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryV1 {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub icon: MemoryIcon,
}

impl From<MemoryV1> for Memory {
    fn from(dto: MemoryV1) -> Self {
        Memory::new(dto.id, dto.title, dto.content, dto.icon)
    }
}

impl From<&Memory> for MemoryV1 {
    fn from(memory: &Memory) -> Self {
        Self {
            id: memory.id.clone(),
            title: memory.title.clone(),
            content: memory.content.clone(),
            icon: memory.icon,
        }
    }
}

/// Root of `memories.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryFileV1 {
    pub version: u32,
    #[serde(default)]
    pub memories: Vec<MemoryV1>,
}

impl MemoryFileV1 {
    pub const VERSION: u32 = 1;

    pub fn new(memories: Vec<MemoryV1>) -> Self {
        Self {
            version: Self::VERSION,
            memories,
        }
    }
}

impl Default for MemoryFileV1 {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
