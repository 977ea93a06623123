//! Conversation history module.
//!
//! - `model`: `HistoryEntry`
//! - `provider`: the `HistoryProvider` collaborator trait
//! - `index`: the read-only `HistoryIndex` rendered in the drawer

mod index;
mod model;
mod provider;

pub use index::HistoryIndex;
pub use model::HistoryEntry;
pub use provider::HistoryProvider;
