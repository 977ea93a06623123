//! Application layer for RAG Chat.
//!
//! Wires the core state machines to their collaborators and drives the
//! responder on tokio.

pub mod memory_usecase;
pub mod session;
pub mod settings_usecase;

pub use memory_usecase::MemoryUseCase;
pub use session::{ChatSession, SessionEvent, SessionView};
pub use settings_usecase::SettingsUseCase;
