//! On-disk DTOs.
//!
//! Each document carries a `version` so the file format can evolve without
//! leaking into the domain models.

mod memory;
mod settings;

pub use memory::{MemoryFileV1, MemoryV1};
pub use settings::SettingsFileV1;

use ragchat_core::error::{ChatError, Result};

/// Rejects documents written by an unknown format version.
pub(crate) fn ensure_version(document: &str, found: u32, expected: u32) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(ChatError::Serialization {
            format: "TOML".to_string(),
            message: format!("{document}: unsupported version {found} (expected {expected})"),
        })
    }
}
