//! User settings: the toggles on the settings screen.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications_enabled: true,
        }
    }
}

/// Persistence collaborator for settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads settings, falling back to defaults when nothing is stored yet.
    async fn load_settings(&self) -> Result<Settings>;

    async fn save_settings(&self, settings: &Settings) -> Result<()>;
}
