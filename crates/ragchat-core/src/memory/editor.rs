use super::model::{Memory, MemoryIcon};
use crate::error::{ChatError, Result};
use uuid::Uuid;

/// Form state of the add/edit memory screen.
///
/// Created empty for a new memory or pre-filled from an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryEditor {
    /// Id of the memory being edited; `None` while adding.
    target: Option<String>,
    title: String,
    content: String,
    icon: MemoryIcon,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(memory: &Memory) -> Self {
        Self {
            target: Some(memory.id.clone()),
            title: memory.title.clone(),
            content: memory.content.clone(),
            icon: memory.icon,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_icon(&mut self, icon: MemoryIcon) {
        self.icon = icon;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    /// Validates the form and produces the memory to save.
    ///
    /// New memories get a fresh UUID; edits keep the original id.
    pub fn build(&self) -> Result<Memory> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ChatError::validation("memory title is blank"));
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ChatError::validation("memory content is blank"));
        }

        let id = self
            .target
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok(Memory::new(id, title, content, self.icon))
    }
}
