//! UI panels for ShoreCrew Desktop.
//!
//! Panels paint core view models and report what the user clicked as
//! [`UiAction`]s; the app applies them after the frame is laid out.

pub mod conditions_panel;
pub mod create_event;
pub mod crew_panel;
pub mod events_panel;
pub mod header;
pub mod status_bar;

pub use create_event::CreateEventDialog;
pub use status_bar::StatusBar;

use shorecrew_core::EventId;

/// Page sections reachable from the header navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Map,
    Conditions,
    Crew,
    Events,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Map, Section::Conditions, Section::Crew, Section::Events];

    pub fn title(self) -> &'static str {
        match self {
            Section::Map => "Map",
            Section::Conditions => "Conditions",
            Section::Crew => "Crew",
            Section::Events => "Events",
        }
    }
}

/// User intent collected while drawing a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Join(EventId),
    /// Center the map on an event and open its popup
    ShowOnMap(EventId),
    OpenCreateDialog,
    CreateEvent { name: Option<String>, date: Option<String> },
    Locate,
    RetryMap,
    LearnMore,
    GetStarted,
    ScrollTo(Section),
}
