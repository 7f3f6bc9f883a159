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

//! In-memory domain store.
//!
//! The store is the single source of truth for rendering. It is owned by the
//! application and handed to the view and handler functions explicitly; its
//! lifetime is one app session and nothing is persisted.

mod seed;

use chrono::Utc;
use log::{debug, info};

use crate::model::{CleanupEvent, CrewMember, EventId, GeoPoint};

const DEFAULT_EVENT_TIME: &str = "09:00";
const DEFAULT_EVENT_DESCRIPTION: &str = "Community beach cleanup.";

/// Crew, events and the user's last known position.
#[derive(Debug, Default)]
pub struct DomainStore {
    crew: Vec<CrewMember>,
    events: Vec<CleanupEvent>,
    user_location: Option<GeoPoint>,
    /// Last millisecond reading handed out as an event id.
    last_id_millis: i64,
}

impl DomainStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated with the sample data.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.seed();
        store
    }

    /// Replace all contents with the sample crew and events.
    ///
    /// Calling this again discards anything added since the previous seed,
    /// including the user location.
    pub fn seed(&mut self) {
        self.crew = seed::crew();
        self.events = seed::events();
        self.user_location = None;
        info!(
            "Seeded store with {} crew members and {} events",
            self.crew.len(),
            self.events.len()
        );
    }

    #[must_use]
    pub fn crew(&self) -> &[CrewMember] {
        &self.crew
    }

    /// Events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[CleanupEvent] {
        &self.events
    }

    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&CleanupEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn user_location(&self) -> Option<GeoPoint> {
        self.user_location
    }

    pub fn set_user_location(&mut self, location: GeoPoint) {
        self.user_location = Some(location);
    }

    /// Append a new event with a fresh id and a single participant.
    pub fn add_event(&mut self, name: &str, date: &str, lat: f64, lng: f64) -> CleanupEvent {
        let id = self.next_event_id(Utc::now().timestamp_millis());
        let event = CleanupEvent {
            id,
            name: name.to_string(),
            lat,
            lng,
            date: date.to_string(),
            time: DEFAULT_EVENT_TIME.to_string(),
            participant_count: 1,
            description: DEFAULT_EVENT_DESCRIPTION.to_string(),
        };
        info!("Created event {} '{}' at {:.4}, {:.4}", event.id, event.name, lat, lng);
        self.events.push(event.clone());
        event
    }

    /// Add one participant to the event.
    ///
    /// Returns the new participant count, or `None` (and changes nothing) if
    /// no event has this id.
    pub fn join_event(&mut self, id: &EventId) -> Option<u32> {
        let Some(event) = self.events.iter_mut().find(|e| &e.id == id) else {
            debug!("Join ignored for unknown event {id}");
            return None;
        };
        event.participant_count += 1;
        Some(event.participant_count)
    }

    /// Derive an id from the clock reading, bumped past the last one issued
    /// so ids stay unique even when two events land in the same millisecond.
    fn next_event_id(&mut self, now_millis: i64) -> EventId {
        let mut millis = now_millis.max(self.last_id_millis + 1);
        loop {
            let id = EventId::new(format!("event-{millis}"));
            if self.event(&id).is_none() {
                self.last_id_millis = millis;
                return id;
            }
            millis += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_loads_sample_data() {
        let store = DomainStore::seeded();
        assert_eq!(store.crew().len(), 5);

        let counts: Vec<(&str, u32)> = store
            .events()
            .iter()
            .map(|e| (e.id.as_str(), e.participant_count))
            .collect();
        assert_eq!(counts, vec![("event-1", 24), ("event-2", 18), ("event-3", 31)]);
    }

    #[test]
    fn test_seed_discards_additions() {
        let mut store = DomainStore::seeded();
        store.add_event("Extra", "2025-07-01", 1.0, 103.0);
        store.set_user_location(GeoPoint::new(1.3, 103.8));

        store.seed();

        assert_eq!(store.events().len(), 3);
        assert!(store.user_location().is_none());
    }

    #[test]
    fn test_join_increments_by_one() {
        let mut store = DomainStore::seeded();

        assert_eq!(store.join_event(&"event-2".into()), Some(19));

        let counts: Vec<u32> = store.events().iter().map(|e| e.participant_count).collect();
        assert_eq!(counts, vec![24, 19, 31]);
    }

    #[test]
    fn test_join_unknown_event_is_noop() {
        let mut store = DomainStore::seeded();
        let before = store.events().to_vec();

        assert_eq!(store.join_event(&"event-99".into()), None);
        assert_eq!(store.events(), before.as_slice());
    }

    #[test]
    fn test_join_created_event() {
        let mut store = DomainStore::seeded();
        let created = store.add_event("Night Patrol", "2025-08-01", 1.28, 103.85);

        assert_eq!(created.participant_count, 1);
        assert_eq!(store.join_event(&created.id), Some(2));
    }

    #[test]
    fn test_add_event_ids_are_unique() {
        let mut store = DomainStore::seeded();
        for i in 0..50 {
            let existing: Vec<EventId> = store.events().iter().map(|e| e.id.clone()).collect();
            let created = store.add_event(&format!("Event {i}"), "2025-09-01", 1.3, 103.9);
            assert!(!existing.contains(&created.id));
        }
        assert_eq!(store.events().len(), 53);
    }

    #[test]
    fn test_event_id_bumps_past_clock_collisions() {
        let mut store = DomainStore::new();
        assert_eq!(store.next_event_id(1_000).as_str(), "event-1000");
        assert_eq!(store.next_event_id(1_000).as_str(), "event-1001");
        // A clock that steps backwards still yields increasing ids.
        assert_eq!(store.next_event_id(500).as_str(), "event-1002");
    }

    #[test]
    fn test_add_event_preserves_insertion_order() {
        let mut store = DomainStore::seeded();
        let created = store.add_event("Last", "2025-09-01", 1.3, 103.9);
        assert_eq!(store.events().last().map(|e| &e.id), Some(&created.id));
    }
}
