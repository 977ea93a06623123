//! Memories screen and the add/edit memory form.

use ragchat_core::error::{ChatError, Result};
use ragchat_core::memory::{Memory, MemoryEditor, MemoryProvider};
use ragchat_core::navigation::{Navigator, Route};
use std::sync::Arc;

/// Keeps the memories list in sync with its provider.
///
/// Failures are returned to the caller and also kept in `last_error` so the
/// screen can show them; the list is only changed after the provider agreed.
pub struct MemoryUseCase {
    provider: Arc<dyn MemoryProvider>,
    navigator: Arc<dyn Navigator>,
    memories: Vec<Memory>,
    last_error: Option<ChatError>,
}

impl MemoryUseCase {
    pub fn new(provider: Arc<dyn MemoryProvider>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            provider,
            navigator,
            memories: Vec::new(),
            last_error: None,
        }
    }

    /// Reloads the list from the provider.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.provider.load_memories().await {
            Ok(memories) => {
                tracing::debug!("[MemoryUseCase] loaded {} memories", memories.len());
                self.memories = memories;
                Ok(())
            }
            Err(e) => Err(self.record_error(e)),
        }
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    pub fn get(&self, id: &str) -> Option<&Memory> {
        self.memories.iter().find(|m| m.id == id)
    }

    /// Opens an empty form.
    pub fn new_memory(&self) -> MemoryEditor {
        self.navigator.push(Route::AddMemory);
        MemoryEditor::new()
    }

    /// Opens the form pre-filled with memory `id`.
    pub fn edit_memory(&self, id: &str) -> Result<MemoryEditor> {
        let memory = self
            .get(id)
            .ok_or_else(|| ChatError::not_found("Memory", id))?;
        self.navigator.push(Route::AddMemory);
        Ok(MemoryEditor::edit(memory))
    }

    /// Validates and stores the form, then leaves the form screen.
    pub async fn save(&mut self, editor: &MemoryEditor) -> Result<Memory> {
        let memory = editor.build().map_err(|e| self.record_error(e))?;

        if let Err(e) = self.provider.save_memory(&memory).await {
            return Err(self.record_error(e));
        }

        match self.memories.iter_mut().find(|m| m.id == memory.id) {
            Some(existing) => *existing = memory.clone(),
            None => self.memories.push(memory.clone()),
        }
        self.last_error = None;
        tracing::info!("[MemoryUseCase] saved memory id={}", memory.id);

        self.navigator.back();
        Ok(memory)
    }

    /// Deletes the memory the form is editing, then leaves the form screen.
    ///
    /// A form for a memory that was never saved is simply discarded.
    pub async fn delete(&mut self, editor: &MemoryEditor) -> Result<()> {
        let Some(id) = editor.target().map(str::to_string) else {
            tracing::debug!("[MemoryUseCase] discarding unsaved memory form");
            self.navigator.back();
            return Ok(());
        };

        if let Err(e) = self.provider.delete_memory(&id).await {
            return Err(self.record_error(e));
        }

        self.memories.retain(|m| m.id != id);
        self.last_error = None;
        tracing::info!("[MemoryUseCase] deleted memory id={}", id);

        self.navigator.back();
        Ok(())
    }

    pub fn last_error(&self) -> Option<&ChatError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    fn record_error(&mut self, error: ChatError) -> ChatError {
        tracing::warn!("[MemoryUseCase] {}", error);
        self.last_error = Some(error.clone());
        error
    }
}
