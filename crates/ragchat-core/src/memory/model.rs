use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Category glyph shown next to a memory. Closed set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MemoryIcon {
    TravelExplore,
    Lightbulb,
    Person,
    ShowChart,
    Groups,
    #[default]
    Note,
}

/// A user-curated piece of context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub icon: MemoryIcon,
}

impl Memory {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        icon: MemoryIcon,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            icon,
        }
    }
}
