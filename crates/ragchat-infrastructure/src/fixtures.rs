//! Sample data the mobile mock shipped with.

use chrono::Utc;
use ragchat_core::history::HistoryEntry;
use ragchat_core::memory::{Memory, MemoryIcon};

pub fn sample_history() -> Vec<HistoryEntry> {
    let now = Utc::now();
    vec![
        HistoryEntry::new("1", "Document analysis", now),
        HistoryEntry::new("2", "Research help", now),
    ]
}

pub fn sample_memories() -> Vec<Memory> {
    vec![
        Memory::new(
            "1",
            "Travel Plans",
            "Discussed travel plans for the summer trip to Italy, including cities to visit and potential accommodations.",
            MemoryIcon::TravelExplore,
        ),
        Memory::new(
            "2",
            "Project Ideas",
            "Brainstormed ideas for a new mobile application focused on local community events.",
            MemoryIcon::Lightbulb,
        ),
        Memory::new(
            "3",
            "Personal Stories",
            "Shared personal stories about childhood memories and favorite family traditions.",
            MemoryIcon::Person,
        ),
        Memory::new(
            "4",
            "Market Trends",
            "Reviewed and analyzed recent market trends in the renewable energy sector.",
            MemoryIcon::ShowChart,
        ),
        Memory::new(
            "5",
            "Team Collaboration",
            "Discussed strategies for improving team collaboration and communication for remote work.",
            MemoryIcon::Groups,
        ),
    ]
}
