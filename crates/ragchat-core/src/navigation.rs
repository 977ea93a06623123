//! Navigation collaborator.
//!
//! The core asks for screen transitions by route and never manages the
//! navigation stack itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Chat,
    History,
    Settings,
    Memories,
    AddMemory,
}

impl Route {
    /// Router path of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Chat => "/",
            Route::History => "history",
            Route::Settings => "settings",
            Route::Memories => "memories",
            Route::AddMemory => "add-memory",
        }
    }
}

pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);

    fn back(&self);
}

/// Navigator that ignores every request, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn push(&self, route: Route) {
        tracing::debug!("[NoopNavigator] push {}", route.path());
    }

    fn back(&self) {
        tracing::debug!("[NoopNavigator] back");
    }
}
