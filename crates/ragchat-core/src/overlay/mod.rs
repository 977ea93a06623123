//! Overlay domain module.
//!
//! - `state`: the `OverlayController` state machine (`Overlay`, `OverlayCommand`)
//! - `animation`: drawer slide interpolation derived from the state
//! - `upload`: options of the attachment-choice sheet

mod animation;
mod state;
mod upload;

pub use animation::{CubicBezier, DrawerAnimation};
pub use state::{CloseReason, Overlay, OverlayCommand, OverlayController, OverlayTransition};
pub use upload::UploadOption;
