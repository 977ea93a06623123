//! Message domain module.
//!
//! - `model`: `Message`, `MessageId`, `Origin`, `MessageStatus`
//! - `store`: the append-only `MessageStore`

mod model;
mod store;

pub use model::{Message, MessageId, MessageStatus, Origin};
pub use store::MessageStore;
