//! TOML-backed settings persistence.

use crate::dto::{SettingsFileV1, ensure_version};
use crate::paths::RagChatPaths;
use crate::storage::TomlFile;
use async_trait::async_trait;
use ragchat_core::config::StorageConfig;
use ragchat_core::error::Result;
use ragchat_core::settings::{Settings, SettingsRepository};
use std::path::PathBuf;

pub struct TomlSettingsRepository {
    file: TomlFile<SettingsFileV1>,
}

impl TomlSettingsRepository {
    pub fn new(storage: &StorageConfig) -> Result<Self> {
        Ok(Self::with_path(RagChatPaths::settings_file(storage)?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: TomlFile::new(path),
        }
    }
}

#[async_trait]
impl SettingsRepository for TomlSettingsRepository {
    async fn load_settings(&self) -> Result<Settings> {
        match self.file.load().await? {
            Some(document) => {
                ensure_version("settings.toml", document.version, SettingsFileV1::VERSION)?;
                Ok(document.into())
            }
            None => Ok(Settings::default()),
        }
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.file.save(&SettingsFileV1::from(settings)).await
    }
}
