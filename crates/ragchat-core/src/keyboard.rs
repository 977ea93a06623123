//! Keyboard-height notifications.
//!
//! Only used to pad the bottom of the scrollable thread; never for logic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum KeyboardEvent {
    Shown { height: f32 },
    Hidden,
}

/// Bottom content inset of the thread.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardInset {
    bottom: f32,
}

impl KeyboardInset {
    pub fn apply(&mut self, event: KeyboardEvent) {
        self.bottom = match event {
            KeyboardEvent::Shown { height } => height.max(0.0),
            KeyboardEvent::Hidden => 0.0,
        };
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }
}
