use ragchat_core::history::HistoryEntry;
use ragchat_core::message::Message;
use ragchat_core::overlay::{Overlay, UploadOption};

/// Everything the chat screen needs to draw one frame.
///
/// Borrowed from the session, so it always reflects a state between two
/// events and never a half-applied one.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub messages: &'a [Message],
    pub draft: &'a str,
    pub overlay: Overlay,
    /// Horizontal offset of the history drawer.
    pub drawer_offset: f32,
    /// Bottom padding of the thread while the keyboard is up.
    pub bottom_inset: f32,
    /// Replies requested but not yet in `messages`.
    pub pending_replies: usize,
    pub history: &'a [HistoryEntry],
    pub last_upload: Option<UploadOption>,
}
