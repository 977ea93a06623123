//! Settings screen.

use ragchat_core::error::{ChatError, Result};
use ragchat_core::settings::{Settings, SettingsRepository};
use std::sync::Arc;

pub struct SettingsUseCase {
    repository: Arc<dyn SettingsRepository>,
    settings: Settings,
    last_error: Option<ChatError>,
}

impl SettingsUseCase {
    /// Starts from the defaults; call [`load`](Self::load) to read stored values.
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self {
            repository,
            settings: Settings::default(),
            last_error: None,
        }
    }

    pub async fn load(&mut self) -> Result<Settings> {
        match self.repository.load_settings().await {
            Ok(settings) => {
                self.settings = settings;
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!("[SettingsUseCase] failed to load settings: {}", e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub async fn set_dark_mode(&mut self, enabled: bool) -> Result<Settings> {
        let next = Settings {
            dark_mode: enabled,
            ..self.settings
        };
        self.commit(next).await
    }

    pub async fn set_notifications(&mut self, enabled: bool) -> Result<Settings> {
        let next = Settings {
            notifications_enabled: enabled,
            ..self.settings
        };
        self.commit(next).await
    }

    // The toggle only flips once the value is stored.
    async fn commit(&mut self, next: Settings) -> Result<Settings> {
        if next == self.settings {
            return Ok(next);
        }

        if let Err(e) = self.repository.save_settings(&next).await {
            tracing::warn!("[SettingsUseCase] failed to save settings: {}", e);
            self.last_error = Some(e.clone());
            return Err(e);
        }

        tracing::debug!("[SettingsUseCase] saved {:?}", next);
        self.settings = next;
        self.last_error = None;
        Ok(next)
    }

    pub fn last_error(&self) -> Option<&ChatError> {
        self.last_error.as_ref()
    }
}
