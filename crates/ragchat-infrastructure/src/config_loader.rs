//! Loads `config.toml`.

use crate::paths::RagChatPaths;
use ragchat_core::config::AppConfig;
use ragchat_core::error::{ChatError, Result};
use std::path::Path;

/// Loads the application configuration.
///
/// Reads `path` when given, otherwise the default `config.toml` location.
/// A missing or empty file yields the defaults; a file that exists but cannot
/// be parsed is an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match RagChatPaths::config_file() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("[config] {}; using defaults", e);
                return Ok(AppConfig::default());
            }
        },
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("[config] {:?} not found; using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(ChatError::config(format!(
                "Failed to read config file at {:?}: {}",
                path, e
            )));
        }
    };

    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    let config: AppConfig = toml::from_str(&content)?;
    tracing::debug!("[config] loaded {:?}", path);
    Ok(config)
}
