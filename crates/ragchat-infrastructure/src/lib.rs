//! Collaborator implementations for the RAG Chat core.

pub mod config_loader;
pub mod dto;
pub mod fixtures;
pub mod in_memory;
pub mod paths;
pub mod storage;
pub mod toml_memory_repository;
pub mod toml_settings_repository;

pub use config_loader::load_config;
pub use in_memory::{InMemoryMemoryRepository, InMemorySettingsRepository, StaticHistoryProvider};
pub use paths::RagChatPaths;
pub use toml_memory_repository::TomlMemoryRepository;
pub use toml_settings_repository::TomlSettingsRepository;
