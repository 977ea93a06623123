//! Memory domain module.
//!
//! Memories are user-curated notes listed on the memories screen and edited
//! on the add-memory screen.
//!
//! - `model`: `Memory`, `MemoryIcon`
//! - `provider`: the `MemoryProvider` persistence trait
//! - `editor`: form state of the add/edit screen

mod editor;
mod model;
mod provider;

pub use editor::MemoryEditor;
pub use model::{Memory, MemoryIcon};
pub use provider::MemoryProvider;
