//! Settings DTOs

use ragchat_core::settings::Settings;
use serde::{Deserialize, Serialize};

/// Root of `settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFileV1 {
    pub version: u32,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl SettingsFileV1 {
    pub const VERSION: u32 = 1;
}

impl From<SettingsFileV1> for Settings {
    fn from(dto: SettingsFileV1) -> Self {
        Settings {
            dark_mode: dto.dark_mode,
            notifications_enabled: dto.notifications_enabled,
        }
    }
}

impl From<&Settings> for SettingsFileV1 {
    fn from(settings: &Settings) -> Self {
        Self {
            version: Self::VERSION,
            dark_mode: settings.dark_mode,
            notifications_enabled: settings.notifications_enabled,
        }
    }
}
