//! Headless core of the RAG Chat front end.
//!
//! Everything here is plain state: no I/O, no rendering. Collaborators
//! (responder, history/memory/settings storage, navigation) are traits that
//! the infrastructure and application crates implement and wire together.

pub mod composer;
pub mod config;
pub mod error;
pub mod history;
pub mod keyboard;
pub mod memory;
pub mod message;
pub mod navigation;
pub mod overlay;
pub mod responder;
pub mod settings;

// Re-export common error type
pub use error::{ChatError, Result};
