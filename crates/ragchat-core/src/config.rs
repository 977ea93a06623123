//! Application configuration model.
//!
//! Every field has a default so that an empty or partial `config.toml` is
//! always valid. Loading from disk lives in the infrastructure crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub chat: ChatConfig,
    pub drawer: DrawerConfig,
    pub storage: StorageConfig,
}

/// Texts and limits used by the chat session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    /// Assistant message every fresh thread starts with.
    pub greeting: String,
    /// Reply returned by the placeholder responder.
    pub placeholder_reply: String,
    /// Text of the assistant message appended when a reply fails.
    pub failure_notice: String,
    /// Number of preceding messages handed to the responder as context.
    pub context_window: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hello! How can I assist you today?".to_string(),
            placeholder_reply: "Processing your request...".to_string(),
            failure_notice: "Something went wrong. Tap to retry.".to_string(),
            context_window: 20,
        }
    }
}

/// Geometry and timing of the history drawer slide.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DrawerConfig {
    pub width: f32,
    pub duration_ms: u64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            duration_ms: 300,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory when set.
    pub data_dir: Option<PathBuf>,
}
