//! Overlay state machine.

use super::animation::DrawerAnimation;
use super::upload::UploadOption;
use crate::config::DrawerConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Which surface is layered above the thread. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    #[default]
    None,
    History,
    UploadMenu,
}

/// What dismissed an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Close button or toggle.
    Explicit,
    /// Tap on the dimmed area outside the overlay.
    ScrimTap,
    /// Hardware/system back request.
    SystemBack,
    /// An upload option was picked.
    Selection,
}

/// Input to the overlay state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum OverlayCommand {
    OpenHistory,
    OpenUploadMenu,
    ToggleHistory,
    Close(CloseReason),
    SelectUpload(UploadOption),
}

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTransition {
    pub from: Overlay,
    pub to: Overlay,
    /// Set when the command was an accepted upload selection.
    pub selection: Option<UploadOption>,
}

impl OverlayTransition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Owns the active overlay and the drawer animation derived from it.
///
/// Switching directly between the two overlays is a single close-then-open
/// transition. Selecting an upload option records the selection and closes
/// the sheet in the same step.
#[derive(Debug, Clone)]
pub struct OverlayController {
    active: Overlay,
    drawer: DrawerAnimation,
    open_offset: f32,
    closed_offset: f32,
    last_selection: Option<UploadOption>,
}

impl OverlayController {
    pub fn new(config: &DrawerConfig) -> Self {
        let closed_offset = -config.width.abs();
        Self {
            active: Overlay::None,
            drawer: DrawerAnimation::resting(
                closed_offset,
                Duration::from_millis(config.duration_ms),
            ),
            open_offset: 0.0,
            closed_offset,
            last_selection: None,
        }
    }

    pub fn active(&self) -> Overlay {
        self.active
    }

    pub fn last_selection(&self) -> Option<UploadOption> {
        self.last_selection
    }

    /// Applies `command` at time `now`. Never fails; stale or redundant
    /// commands yield an unchanged transition.
    pub fn apply(&mut self, command: OverlayCommand, now: Instant) -> OverlayTransition {
        let from = self.active;
        let mut selection = None;

        let to = match command {
            OverlayCommand::OpenHistory => Overlay::History,
            OverlayCommand::OpenUploadMenu => Overlay::UploadMenu,
            OverlayCommand::ToggleHistory => {
                if from == Overlay::History {
                    Overlay::None
                } else {
                    Overlay::History
                }
            }
            OverlayCommand::Close(reason) => {
                if from != Overlay::None {
                    tracing::debug!("[OverlayController] closing {:?} ({:?})", from, reason);
                }
                Overlay::None
            }
            OverlayCommand::SelectUpload(option) => {
                if from == Overlay::UploadMenu {
                    selection = Some(option);
                    self.last_selection = Some(option);
                    Overlay::None
                } else {
                    tracing::debug!(
                        "[OverlayController] ignoring stale upload selection {:?} while {:?}",
                        option,
                        from
                    );
                    from
                }
            }
        };

        self.active = to;
        self.drawer.retarget(self.drawer_target(), now);

        if from != to {
            tracing::debug!("[OverlayController] {:?} -> {:?}", from, to);
        }

        OverlayTransition {
            from,
            to,
            selection,
        }
    }

    pub fn open_history(&mut self, now: Instant) -> OverlayTransition {
        self.apply(OverlayCommand::OpenHistory, now)
    }

    pub fn open_upload_menu(&mut self, now: Instant) -> OverlayTransition {
        self.apply(OverlayCommand::OpenUploadMenu, now)
    }

    pub fn toggle_history(&mut self, now: Instant) -> OverlayTransition {
        self.apply(OverlayCommand::ToggleHistory, now)
    }

    pub fn close(&mut self, reason: CloseReason, now: Instant) -> OverlayTransition {
        self.apply(OverlayCommand::Close(reason), now)
    }

    pub fn select_upload(&mut self, option: UploadOption, now: Instant) -> OverlayTransition {
        self.apply(OverlayCommand::SelectUpload(option), now)
    }

    fn drawer_target(&self) -> f32 {
        if self.active == Overlay::History {
            self.open_offset
        } else {
            self.closed_offset
        }
    }

    /// Drawer offset to render at `now`.
    pub fn drawer_offset(&self, now: Instant) -> f32 {
        self.drawer.value_at(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.drawer.is_settled(now)
    }
}
