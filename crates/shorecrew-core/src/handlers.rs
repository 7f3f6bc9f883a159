// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interaction handlers.
//!
//! [`CleanupSession`] owns the store, the map adapter and the rendered views.
//! Each handler mutates the store and re-renders the affected views before it
//! returns, so the UI always paints state that matches the store.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::locate::{LocateError, Locator};
use crate::markers::{EventMarkers, MapAdapter, USER_ZOOM};
use crate::model::{EventId, GeoPoint};
use crate::store::DomainStore;
use crate::view::{render_crew, render_events, CrewView, EventsView};

const MAX_NOTICES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    /// Spoken to assistive technology as well as displayed.
    Announcement,
    Warning,
}

/// User-visible message with timestamp.
#[derive(Debug, Clone)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub message: String,
}

/// Most recent notices, oldest dropped first.
#[derive(Debug, Default)]
pub struct Notices {
    entries: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Warning => warn!("{message}"),
            NoticeLevel::Info | NoticeLevel::Announcement => info!("{message}"),
        }
        if self.entries.len() >= MAX_NOTICES {
            self.entries.pop_front();
        }
        self.entries.push_back(Notice {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    /// Latest announcement, for the live region read by screen readers.
    #[must_use]
    pub fn latest_announcement(&self) -> Option<&Notice> {
        self.entries
            .iter()
            .rev()
            .find(|n| n.level == NoticeLevel::Announcement)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notice> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Store, map and rendered views for one app session.
#[derive(Debug)]
pub struct CleanupSession<M> {
    store: DomainStore,
    map: M,
    markers: EventMarkers,
    notices: Notices,
    crew_view: CrewView,
    events_view: EventsView,
}

impl<M: MapAdapter> CleanupSession<M> {
    /// Take ownership of a store and map and paint the initial views.
    pub fn new(store: DomainStore, mut map: M) -> Self {
        let mut markers = EventMarkers::new();
        let crew_view = render_crew(&store);
        let events_view = render_events(&store, &mut markers, &mut map);
        Self {
            store,
            map,
            markers,
            notices: Notices::default(),
            crew_view,
            events_view,
        }
    }

    #[must_use]
    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Mutable map alongside the data it displays.
    pub fn map_with_views(&mut self) -> (&mut M, &DomainStore, &EventsView) {
        (&mut self.map, &self.store, &self.events_view)
    }

    #[must_use]
    pub fn crew_view(&self) -> &CrewView {
        &self.crew_view
    }

    #[must_use]
    pub fn events_view(&self) -> &EventsView {
        &self.events_view
    }

    #[must_use]
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(level, message);
    }

    /// Re-render both lists, e.g. after the map widget was re-initialized.
    pub fn rerender(&mut self) {
        self.crew_view = render_crew(&self.store);
        self.rerender_events();
        if let Some(location) = self.store.user_location() {
            self.map.set_user_marker(location.lat, location.lng);
        }
    }

    fn rerender_events(&mut self) {
        self.events_view = render_events(&self.store, &mut self.markers, &mut self.map);
    }

    /// Add the user to an event. Unknown ids change nothing.
    pub fn join(&mut self, id: &EventId) -> Option<u32> {
        let count = self.store.join_event(id)?;
        self.rerender_events();

        let name = self
            .store
            .event(id)
            .map_or_else(|| id.to_string(), |e| e.name.clone());
        let noun = if count == 1 { "participant" } else { "participants" };
        self.notices.push(
            NoticeLevel::Announcement,
            format!("Joined {name}. {count} {noun}."),
        );
        Some(count)
    }

    /// Create an event at the current map center.
    ///
    /// `None` stands for a cancelled prompt. A cancelled or blank name or
    /// date aborts without touching the store.
    pub fn create_event(&mut self, name: Option<&str>, date: Option<&str>) -> Option<EventId> {
        let name = name.map(str::trim).filter(|s| !s.is_empty())?;
        let date = date.map(str::trim).filter(|s| !s.is_empty())?;

        let center = self.map.center();
        let event = self.store.add_event(name, date, center.lat, center.lng);
        self.rerender_events();
        self.notices.push(
            NoticeLevel::Announcement,
            format!("Created {} on {}.", event.name, event.date),
        );
        Some(event.id)
    }

    /// Query the locator and apply the result.
    pub fn locate(&mut self, locator: &dyn Locator) -> Result<GeoPoint, LocateError> {
        let result = locator.locate();
        self.apply_location(result.clone());
        result
    }

    /// Apply a finished location query. Failures leave the store, the user
    /// marker and the map view as they were and raise a notice.
    pub fn apply_location(&mut self, result: Result<GeoPoint, LocateError>) {
        match result {
            Ok(point) => {
                self.store.set_user_location(point);
                self.map.set_user_marker(point.lat, point.lng);
                self.map.recenter(point.lat, point.lng, USER_ZOOM);
                self.notices
                    .push(NoticeLevel::Info, format!("Centered on your location ({point})."));
            }
            Err(e) => self.notices.push(NoticeLevel::Warning, e.to_string()),
        }
    }
}
