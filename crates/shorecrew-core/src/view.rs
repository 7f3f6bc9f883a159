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

//! Render functions: projections of the store into view models.
//!
//! Every projection is a pure function of its inputs, so rendering twice
//! without a store mutation in between yields equal views and identical
//! text. The UI paints these models; their `Display` output is the plain-text
//! rendering used by headless mode.

use std::fmt;

use crate::markers::{EventMarkers, MapAdapter};
use crate::model::{EventId, GeoPoint};
use crate::store::DomainStore;
use crate::weather::{ConditionsResult, ConditionsView};

/// Label shown next to conditions that did not come from the live source.
pub const DEMO_DATA_LABEL: &str = "Demo data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewRow {
    pub avatar: String,
    pub name: String,
    pub cleanups_completed: u32,
    pub items_collected: u32,
}

/// Crew list plus summary counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewView {
    pub rows: Vec<CrewRow>,
    pub member_count: usize,
    pub total_cleanups: u32,
    pub total_items: u32,
}

#[must_use]
pub fn render_crew(store: &DomainStore) -> CrewView {
    let rows: Vec<CrewRow> = store
        .crew()
        .iter()
        .map(|m| CrewRow {
            avatar: m.avatar.clone(),
            name: m.name.clone(),
            cleanups_completed: m.cleanups_completed,
            items_collected: m.items_collected,
        })
        .collect();

    CrewView {
        member_count: rows.len(),
        total_cleanups: rows.iter().map(|r| r.cleanups_completed).sum(),
        total_items: rows.iter().map(|r| r.items_collected).sum(),
        rows,
    }
}

impl fmt::Display for CrewView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Crew ({} members, {} cleanups, {} items collected)",
            self.member_count, self.total_cleanups, self.total_items
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "  {} {} - {} cleanups, {} items",
                row.avatar, row.name, row.cleanups_completed, row.items_collected
            )?;
        }
        Ok(())
    }
}

/// One event line; every row carries a join action for `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub id: EventId,
    pub name: String,
    pub date: String,
    pub time: String,
    pub participant_count: u32,
    pub description: String,
    pub location: GeoPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventsView {
    pub rows: Vec<EventRow>,
}

impl EventsView {
    /// Rows in store order; no sorting is applied.
    #[must_use]
    pub fn project(store: &DomainStore) -> Self {
        let rows = store
            .events()
            .iter()
            .map(|e| EventRow {
                id: e.id.clone(),
                name: e.name.clone(),
                date: e.date.clone(),
                time: e.time.clone(),
                participant_count: e.participant_count,
                description: e.description.clone(),
                location: e.position(),
            })
            .collect();
        Self { rows }
    }
}

/// Project the event list and refresh every event marker on the map.
pub fn render_events<M: MapAdapter + ?Sized>(
    store: &DomainStore,
    markers: &mut EventMarkers,
    map: &mut M,
) -> EventsView {
    markers.refresh(map, store.events());
    EventsView::project(store)
}

impl fmt::Display for EventsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Events ({})", self.rows.len())?;
        for row in &self.rows {
            let noun = if row.participant_count == 1 {
                "participant"
            } else {
                "participants"
            };
            writeln!(
                f,
                "  [{}] {} - {} {} @ {} - {} {noun} [Join]",
                row.id, row.name, row.date, row.time, row.location, row.participant_count
            )?;
            writeln!(f, "      {}", row.description)?;
        }
        Ok(())
    }
}

/// Conditions panel content, tagged when the data is synthetic.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsPanel {
    pub view: ConditionsView,
    /// Why live data was not used; `None` for live conditions.
    pub demo_reason: Option<String>,
}

impl ConditionsPanel {
    /// Indicator text that must accompany synthetic data.
    #[must_use]
    pub fn indicator(&self) -> Option<&'static str> {
        self.demo_reason.as_ref().map(|_| DEMO_DATA_LABEL)
    }
}

#[must_use]
pub fn render_conditions(result: &ConditionsResult) -> ConditionsPanel {
    ConditionsPanel {
        view: result.view().clone(),
        demo_reason: result.fallback_reason().map(ToString::to_string),
    }
}

impl fmt::Display for ConditionsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.indicator() {
            Some(label) => writeln!(f, "Conditions [{label}]")?,
            None => writeln!(f, "Conditions")?,
        }

        let current = &self.view.current;
        write!(
            f,
            "  Now: {:.1}°C {}, wind {}",
            current.temperature_c, current.summary, current.wind
        )?;
        if let Some((low, high)) = current.humidity {
            write!(f, ", humidity {low:.0}-{high:.0}%")?;
        }
        writeln!(f)?;

        writeln!(f, "  Forecast:")?;
        for day in &self.view.forecast {
            writeln!(
                f,
                "    {:<12} {:<20} {:.0}-{:.0}°C",
                day.label, day.summary, day.low_c, day.high_c
            )?;
        }

        writeln!(
            f,
            "  Water: {:.1}°C, waves {}",
            self.view.water.temperature_c,
            self.view.water.wave_height.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::MarkerLayer;
    use crate::weather::{synthetic_conditions, WeatherError};
    use chrono::NaiveDate;

    #[test]
    fn test_crew_aggregates() {
        let view = render_crew(&DomainStore::seeded());

        assert_eq!(view.member_count, 5);
        assert_eq!(view.total_cleanups, 42 + 35 + 28 + 19 + 12);
        assert_eq!(view.total_items, 1_280 + 960 + 742 + 515 + 301);
    }

    #[test]
    fn test_empty_crew_renders_zero_counters() {
        let view = render_crew(&DomainStore::new());
        assert_eq!((view.member_count, view.total_cleanups, view.total_items), (0, 0, 0));
    }

    #[test]
    fn test_render_events_is_idempotent() {
        let store = DomainStore::seeded();
        let mut layer = MarkerLayer::new();
        let mut markers = EventMarkers::new();

        let first = render_events(&store, &mut markers, &mut layer);
        let second = render_events(&store, &mut markers, &mut layer);

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(layer.event_markers().count(), 3);
    }

    #[test]
    fn test_events_keep_insertion_order() {
        let mut store = DomainStore::seeded();
        store.add_event("Alpha Bay", "2025-01-01", 1.2, 103.8);

        let ids: Vec<String> = EventsView::project(&store)
            .rows
            .iter()
            .map(|r| r.id.to_string())
            .collect();

        assert_eq!(&ids[..3], &["event-1", "event-2", "event-3"]);
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_join_then_render_scenario() {
        let mut store = DomainStore::seeded();
        let mut layer = MarkerLayer::new();
        let mut markers = EventMarkers::new();
        render_events(&store, &mut markers, &mut layer);

        store.join_event(&"event-2".into());
        let view = render_events(&store, &mut markers, &mut layer);

        let counts: Vec<u32> = view.rows.iter().map(|r| r.participant_count).collect();
        assert_eq!(counts, vec![24, 19, 31]);
        assert_eq!(layer.event_markers().count(), 3);
    }

    #[test]
    fn test_events_text_rendering() {
        let mut store = DomainStore::new();
        store.add_event("Solo Sweep", "2025-02-02", 1.25, 103.75);

        let text = EventsView::project(&store).to_string();

        assert!(text.starts_with("Events (1)\n"));
        assert!(text.contains("Solo Sweep - 2025-02-02 09:00 @ 1.2500, 103.7500 - 1 participant [Join]"));
    }

    #[test]
    fn test_synthetic_conditions_show_indicator() {
        let today = NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").expect("valid date");
        let result = ConditionsResult::Synthetic {
            view: synthetic_conditions(today),
            reason: WeatherError::MissingForecast,
        };

        let panel = render_conditions(&result);

        assert_eq!(panel.indicator(), Some(DEMO_DATA_LABEL));
        let text = panel.to_string();
        assert!(text.starts_with("Conditions [Demo data]\n"));
        assert!(text.contains("Water: 20.0°C, waves 0.5-1.0 m"));
    }

    #[test]
    fn test_live_conditions_have_no_indicator() {
        let today = NaiveDate::parse_from_str("2025-06-02", "%Y-%m-%d").expect("valid date");
        let panel = render_conditions(&ConditionsResult::Live(synthetic_conditions(today)));

        assert_eq!(panel.indicator(), None);
        assert!(panel.to_string().starts_with("Conditions\n"));
    }
}
