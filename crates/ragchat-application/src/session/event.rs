use ragchat_core::keyboard::KeyboardEvent;
use ragchat_core::message::MessageId;
use ragchat_core::overlay::{CloseReason, UploadOption};

/// UI events a chat screen feeds into its session, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Text input changed.
    DraftChanged(String),
    /// Send button.
    Send,
    /// Tap on a failed reply.
    Retry(MessageId),
    /// Header menu button.
    ToggleHistory,
    OpenHistory,
    /// The `+` button next to the input.
    OpenUploadMenu,
    CloseOverlay(CloseReason),
    SelectUpload(UploadOption),
    Keyboard(KeyboardEvent),
    /// "New Chat" button in the history drawer.
    NewChat,
    OpenMemories,
    OpenSettings,
}
