//! Platform paths for RAG Chat files.
//!
//! ```text
//! ~/.config/ragchat/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/ragchat/      # Data directory
//! ├── memories.toml            # Saved memories
//! └── settings.toml            # Settings screen toggles
//! ```

use ragchat_core::config::StorageConfig;
use ragchat_core::error::{ChatError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "ragchat";

pub struct RagChatPaths;

impl RagChatPaths {
    /// Returns the configuration directory (e.g. `~/.config/ragchat/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChatError::config("Cannot find config directory"))
    }

    /// Returns the default path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the data directory, honouring `storage.data_dir` when set.
    pub fn data_dir(storage: &StorageConfig) -> Result<PathBuf> {
        if let Some(dir) = &storage.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ChatError::config("Cannot find data directory"))
    }

    pub fn memories_file(storage: &StorageConfig) -> Result<PathBuf> {
        Ok(Self::data_dir(storage)?.join("memories.toml"))
    }

    pub fn settings_file(storage: &StorageConfig) -> Result<PathBuf> {
        Ok(Self::data_dir(storage)?.join("settings.toml"))
    }
}
